//! Datos de ejemplo
//!
//! Si `SEED_DATABASE` está activo, al arrancar se crean rutas de ejemplo
//! para las regiones que aún no tienen ninguna. Los datos pasan por el
//! mismo normalizador y servicio que usa la API.

use serde_json::json;
use sqlx::SqlitePool;

use crate::dto::route_dto::RoutePayload;
use crate::repositories::RouteRepository;
use crate::services::field_normalizer::normalize_route_create;
use crate::services::RouteSyncService;
use crate::utils::errors::{AppError, AppResult};

fn demo_routes() -> Vec<serde_json::Value> {
    vec![
        json!({
            "code": "SEL-001",
            "location": "Selangor Main Route",
            "delivery": "Main delivery route for Selangor area",
            "region": "selangor",
            "shift": "AM",
            "deliveryMode": "daily",
            "locations": [
                {
                    "code": "LOC-001",
                    "location": "Petaling Jaya Hub",
                    "address": "Jalan SS2, Petaling Jaya",
                    "contact": "03-1234567",
                    "no": 0,
                    "deliveryMode": "daily",
                    "lat": "3.1073",
                    "lng": "101.6067",
                    "deliverySchedule": [
                        { "day": "Monday", "mode": "daily" },
                        { "day": "Wednesday", "mode": "daily" },
                        { "day": "Friday", "mode": "daily" }
                    ]
                },
                {
                    "code": "LOC-002",
                    "location": "Shah Alam Center",
                    "address": "Seksyen 2, Shah Alam",
                    "contact": "03-7654321",
                    "no": 1,
                    "deliveryMode": "alt1",
                    "lat": "3.0733",
                    "lng": "101.5185",
                    "deliverySchedule": [
                        { "day": "Tuesday", "mode": "alt1" },
                        { "day": "Thursday", "mode": "alt1" }
                    ]
                }
            ]
        }),
        json!({
            "code": "KL-001",
            "location": "Kuala Lumpur Main Route",
            "delivery": "Main delivery route for KL area",
            "region": "kuala-lumpur",
            "shift": "PM",
            "deliveryMode": "daily",
            "locations": [
                {
                    "code": "LOC-003",
                    "location": "KLCC Hub",
                    "address": "Jalan Ampang, KLCC",
                    "contact": "03-2222333",
                    "no": 0,
                    "deliveryMode": "daily",
                    "lat": "3.1578",
                    "lng": "101.7123",
                    "deliverySchedule": [
                        { "day": "Monday", "mode": "daily" },
                        { "day": "Tuesday", "mode": "daily" },
                        { "day": "Wednesday", "mode": "daily" },
                        { "day": "Thursday", "mode": "daily" },
                        { "day": "Friday", "mode": "daily" }
                    ]
                }
            ]
        }),
    ]
}

/// Crea las rutas de ejemplo en las regiones vacías; devuelve cuántas creó
pub async fn seed_demo_routes(pool: &SqlitePool) -> AppResult<usize> {
    let service = RouteSyncService::new(pool.clone());
    let mut created = 0;

    for raw in demo_routes() {
        let payload: RoutePayload = serde_json::from_value(raw)
            .map_err(|e| AppError::Internal(format!("Invalid seed data: {}", e)))?;
        let region = payload.region.clone().unwrap_or_default();

        let mut conn = pool
            .acquire()
            .await
            .map_err(|e| AppError::database("Failed to seed database", e))?;
        if RouteRepository::count_by_region(&mut *conn, &region).await? > 0 {
            log::debug!("Región {} ya tiene rutas, se omite el seed", region);
            continue;
        }
        drop(conn);

        let (route, locations) = normalize_route_create(payload)?;
        service.create_route(route, locations).await?;
        created += 1;
    }

    if created > 0 {
        log::info!("🌱 Seed completado: {} rutas creadas", created);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::DatabaseConnection;

    #[tokio::test]
    async fn test_seed_only_fills_empty_regions() {
        let db = DatabaseConnection::new(&DatabaseConfig::in_memory())
            .await
            .unwrap();

        assert_eq!(seed_demo_routes(db.pool()).await.unwrap(), 2);
        assert_eq!(seed_demo_routes(db.pool()).await.unwrap(), 0);

        let routes = RouteSyncService::new(db.pool().clone())
            .fetch_region("selangor")
            .await
            .unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].route.code, "SEL-001");
        assert!(!routes[0].locations.is_empty());
    }
}
