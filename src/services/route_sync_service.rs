//! Servicio de sincronización de rutas
//!
//! Reconcilia el estado deseado que envía el cliente (ruta + lista completa
//! de paradas) con lo que hay en base de datos. Cada operación de escritura
//! corre dentro de una transacción: si algún paso falla no queda nada a medias.

use std::collections::{HashMap, HashSet};

use sqlx::{SqliteConnection, SqlitePool};

use crate::models::{
    DeliverySchedule, Location, LocationWithChildren, QrCodeImage, Route, RouteWithLocations,
};
use crate::repositories::{LocationRepository, QrCodeRepository, RouteRepository, ScheduleRepository};
use crate::services::field_normalizer::{LocationChanges, NewQrCode, NewRoute, NewSchedule, RoutePatch};
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Resumen de una reconciliación de paradas
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub deleted: u64,
    pub updated: usize,
    pub inserted: usize,
}

/// Ids existentes que no aparecen en la lista deseada
pub fn plan_deletions(existing: &[String], desired: &[LocationChanges]) -> Vec<String> {
    let keep: HashSet<&str> = desired.iter().filter_map(|loc| loc.id.as_deref()).collect();

    existing
        .iter()
        .filter(|id| !keep.contains(id.as_str()))
        .cloned()
        .collect()
}

#[derive(Clone)]
pub struct RouteSyncService {
    pool: SqlitePool,
}

impl RouteSyncService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Ruta completa por id
    pub async fn fetch_route(&self, id: &str) -> AppResult<RouteWithLocations> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database("Failed to fetch route", e))?;

        let route = RouteRepository::find_by_id(&mut *conn, id)
            .await?
            .ok_or_else(|| not_found_error("Route", id))?;

        load_route_tree(&mut *conn, route).await
    }

    /// Todas las rutas completas de una región
    pub async fn fetch_region(&self, region: &str) -> AppResult<Vec<RouteWithLocations>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database("Failed to fetch routes", e))?;

        let routes = RouteRepository::find_by_region(&mut *conn, region).await?;

        let mut trees = Vec::with_capacity(routes.len());
        for route in routes {
            trees.push(load_route_tree(&mut *conn, route).await?);
        }

        Ok(trees)
    }

    /// Crea una ruta con sus paradas, horarios y QR en una sola transacción.
    /// Los ids de parada que mande el cliente se ignoran: todas son nuevas.
    pub async fn create_route(
        &self,
        route: NewRoute,
        locations: Vec<LocationChanges>,
    ) -> AppResult<RouteWithLocations> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database("Failed to create route", e))?;

        let created = RouteRepository::create(&mut *tx, &route).await?;

        let total = locations.len();
        for (index, changes) in locations.into_iter().enumerate() {
            insert_location(&mut *tx, &created.id, None, index, changes).await?;
        }

        let tree = load_route_tree(&mut *tx, created).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database("Failed to create route", e))?;

        log::info!(
            "✅ Ruta {} ({}) creada con {} paradas",
            tree.route.code,
            tree.route.id,
            total
        );

        Ok(tree)
    }

    /// Actualiza los campos presentes de la ruta y, si viene la lista de
    /// paradas, la reconcilia.
    pub async fn update_route(
        &self,
        id: &str,
        patch: RoutePatch,
        locations: Option<Vec<LocationChanges>>,
    ) -> AppResult<RouteWithLocations> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database("Failed to update route", e))?;

        let route = RouteRepository::update(&mut *tx, id, &patch).await?;

        if let Some(desired) = locations {
            let summary = reconcile_locations(&mut *tx, id, desired).await?;
            log::info!(
                "🔄 Ruta {} reconciliada: {} borradas, {} actualizadas, {} creadas",
                id,
                summary.deleted,
                summary.updated,
                summary.inserted
            );
        }

        let tree = load_route_tree(&mut *tx, route).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database("Failed to update route", e))?;

        Ok(tree)
    }

    /// Actualiza una parada suelta; horarios y QR se reemplazan si vienen
    pub async fn update_location(
        &self,
        id: &str,
        changes: LocationChanges,
    ) -> AppResult<LocationWithChildren> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database("Failed to update location", e))?;

        let location = LocationRepository::update(&mut *tx, id, &changes.fields).await?;
        replace_children(&mut *tx, id, changes.schedules, changes.qr_codes).await?;
        RouteRepository::touch(&mut *tx, &location.route_id).await?;

        let tree = load_location_tree(&mut *tx, location).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::database("Failed to update location", e))?;

        Ok(tree)
    }
}

/// Reconcilia las paradas de una ruta con la lista deseada:
/// 1. borra las que ya no aparecen (en cascada con sus hijos);
/// 2. las que traen id se actualizan, o se recrean con ese id si no existen;
/// 3. las que no traen id se insertan.
pub async fn reconcile_locations(
    conn: &mut SqliteConnection,
    route_id: &str,
    desired: Vec<LocationChanges>,
) -> AppResult<ReconcileSummary> {
    let mut summary = ReconcileSummary::default();

    let existing = LocationRepository::ids_by_route(conn, route_id).await?;
    let to_delete = plan_deletions(&existing, &desired);
    if !to_delete.is_empty() {
        summary.deleted = LocationRepository::delete_many(conn, &to_delete).await?;
        log::info!("🗑️ {} paradas eliminadas de la ruta {}", summary.deleted, route_id);
    }

    for (index, changes) in desired.into_iter().enumerate() {
        let Some(id) = changes.id.clone() else {
            insert_location(conn, route_id, None, index, changes).await?;
            summary.inserted += 1;
            continue;
        };

        match LocationRepository::find_by_id(conn, &id).await? {
            Some(current) if current.route_id != route_id => {
                return Err(AppError::BadRequest(format!(
                    "Location '{}' belongs to another route",
                    id
                )));
            }
            Some(_) => {
                LocationRepository::update(conn, &id, &changes.fields).await?;
                replace_children(conn, &id, changes.schedules, changes.qr_codes).await?;
                summary.updated += 1;
            }
            None => {
                log::debug!("Parada {} no existe, se recrea con el mismo id", id);
                insert_location(conn, route_id, Some(&id), index, changes).await?;
                summary.inserted += 1;
            }
        }
    }

    Ok(summary)
}

async fn insert_location(
    conn: &mut SqliteConnection,
    route_id: &str,
    id: Option<&str>,
    index: usize,
    changes: LocationChanges,
) -> AppResult<Location> {
    let new_location = changes.fields.into_new(index);
    let location = LocationRepository::create(conn, route_id, id, &new_location).await?;

    ScheduleRepository::create_many(conn, &location.id, &changes.schedules.unwrap_or_default())
        .await?;
    QrCodeRepository::create_many(conn, &location.id, &changes.qr_codes.unwrap_or_default()).await?;

    Ok(location)
}

/// Reemplazo destructivo de los hijos de una parada; `None` deja la colección intacta
async fn replace_children(
    conn: &mut SqliteConnection,
    location_id: &str,
    schedules: Option<Vec<NewSchedule>>,
    qr_codes: Option<Vec<NewQrCode>>,
) -> AppResult<()> {
    if let Some(schedules) = schedules {
        ScheduleRepository::delete_by_location(conn, location_id).await?;
        ScheduleRepository::create_many(conn, location_id, &schedules).await?;
    }

    if let Some(qr_codes) = qr_codes {
        QrCodeRepository::delete_by_location(conn, location_id).await?;
        QrCodeRepository::create_many(conn, location_id, &qr_codes).await?;
    }

    Ok(())
}

pub async fn load_route_tree(conn: &mut SqliteConnection, route: Route) -> AppResult<RouteWithLocations> {
    let locations = LocationRepository::find_by_route(conn, &route.id).await?;
    let schedules = ScheduleRepository::find_by_route(conn, &route.id).await?;
    let qr_codes = QrCodeRepository::find_by_route(conn, &route.id).await?;

    let mut schedules_by_location: HashMap<String, Vec<DeliverySchedule>> = HashMap::new();
    for schedule in schedules {
        schedules_by_location
            .entry(schedule.location_id.clone())
            .or_default()
            .push(schedule);
    }

    // find_by_route ya viene ordenado por posición
    let mut qr_by_location: HashMap<String, Vec<QrCodeImage>> = HashMap::new();
    for qr in qr_codes {
        qr_by_location.entry(qr.location_id.clone()).or_default().push(qr);
    }

    let locations = locations
        .into_iter()
        .map(|location| LocationWithChildren {
            delivery_schedule: schedules_by_location.remove(&location.id).unwrap_or_default(),
            qr_code_images: qr_by_location.remove(&location.id).unwrap_or_default(),
            location,
        })
        .collect();

    Ok(RouteWithLocations { route, locations })
}

pub async fn load_location_tree(
    conn: &mut SqliteConnection,
    location: Location,
) -> AppResult<LocationWithChildren> {
    let delivery_schedule = ScheduleRepository::find_by_location(conn, &location.id).await?;
    let qr_code_images = QrCodeRepository::find_by_location(conn, &location.id).await?;

    Ok(LocationWithChildren {
        location,
        delivery_schedule,
        qr_code_images,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desired(ids: &[Option<&str>]) -> Vec<LocationChanges> {
        ids.iter()
            .map(|id| LocationChanges {
                id: id.map(str::to_string),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_plan_deletions_removes_omitted_ids() {
        let existing = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let to_delete = plan_deletions(&existing, &desired(&[Some("b"), None]));
        assert_eq!(to_delete, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_plan_deletions_empty_list_deletes_everything() {
        let existing = vec!["a".to_string(), "b".to_string()];
        assert_eq!(plan_deletions(&existing, &[]), existing);
    }

    #[test]
    fn test_plan_deletions_ignores_unknown_ids() {
        let existing = vec!["a".to_string()];
        let to_delete = plan_deletions(&existing, &desired(&[Some("a"), Some("zzz")]));
        assert!(to_delete.is_empty());
    }
}
