use futures::future::join_all;
use sqlx::SqlitePool;

use crate::dto::route_dto::{BulkSaveResponse, BulkSaveResult, RouteDisplay, RoutePayload};
use crate::models::RouteWithLocations;
use crate::repositories::RouteRepository;
use crate::services::field_normalizer::{normalize_route_create, normalize_route_patch};
use crate::services::route_transformer::to_display;
use crate::services::RouteSyncService;
use crate::utils::errors::{bad_request_error, AppError, AppResult};

const REGION_REQUIRED: &str = "Region parameter is required";

pub struct RouteController {
    pool: SqlitePool,
    sync: RouteSyncService,
}

impl RouteController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            sync: RouteSyncService::new(pool.clone()),
            pool,
        }
    }

    pub async fn list_by_region(&self, region: Option<String>) -> AppResult<Vec<RouteDisplay>> {
        let region = region
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| bad_request_error(REGION_REQUIRED))?;

        let routes = self.sync.fetch_region(&region).await?;
        log::debug!("📋 {} rutas encontradas para la región {}", routes.len(), region);

        Ok(to_display(routes))
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<RouteDisplay> {
        let route = self.sync.fetch_route(id).await?;
        Ok(RouteDisplay::from(route))
    }

    pub async fn create(&self, payload: RoutePayload) -> AppResult<RouteWithLocations> {
        let (route, locations) = normalize_route_create(payload)?;
        self.sync.create_route(route, locations).await
    }

    pub async fn update(&self, id: &str, payload: RoutePayload) -> AppResult<RouteWithLocations> {
        let (patch, locations) = normalize_route_patch(payload)?;
        self.sync.update_route(id, patch, locations).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database("Failed to delete route", e))?;

        RouteRepository::delete(&mut *conn, id).await?;
        log::info!("🗑️ Ruta {} eliminada", id);
        Ok(())
    }

    /// Guarda varias rutas de una región a la vez.
    ///
    /// Cada ruta va en su propia transacción y en paralelo: un fallo no
    /// cancela las demás, y el resultado de cada una se reporta por índice.
    pub async fn bulk_save(
        &self,
        region: Option<String>,
        routes: Vec<RoutePayload>,
    ) -> AppResult<BulkSaveResponse> {
        let region = region
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| bad_request_error(REGION_REQUIRED))?;

        let saves = routes.into_iter().map(|mut payload| {
            payload.region = Some(region.clone());
            async move {
                match payload.id.clone() {
                    Some(id) => self.update(&id, payload).await,
                    None => self.create(payload).await,
                }
            }
        });

        let results: Vec<BulkSaveResult> = join_all(saves)
            .await
            .into_iter()
            .enumerate()
            .map(|(index, result)| match result {
                Ok(route) => BulkSaveResult {
                    index,
                    success: true,
                    route: Some(route),
                    error: None,
                },
                Err(e) => {
                    log::warn!("⚠️ Ruta #{} no guardada: {}", index, e);
                    BulkSaveResult {
                        index,
                        success: false,
                        route: None,
                        error: Some(e.public_message()),
                    }
                }
            })
            .collect();

        let saved = results.iter().filter(|r| r.success).count();
        log::info!("💾 Guardado masivo en {}: {}/{} rutas", region, saved, results.len());

        Ok(BulkSaveResponse { results })
    }
}
