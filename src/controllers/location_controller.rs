use sqlx::SqlitePool;

use crate::dto::route_dto::LocationPayload;
use crate::models::LocationWithChildren;
use crate::repositories::LocationRepository;
use crate::services::field_normalizer::normalize_standalone_location;
use crate::services::route_sync_service::load_location_tree;
use crate::services::RouteSyncService;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct LocationController {
    pool: SqlitePool,
    sync: RouteSyncService,
}

impl LocationController {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            sync: RouteSyncService::new(pool.clone()),
            pool,
        }
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<LocationWithChildren> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database("Failed to fetch location", e))?;

        let location = LocationRepository::find_by_id(&mut *conn, id)
            .await?
            .ok_or_else(|| not_found_error("Location", id))?;

        load_location_tree(&mut *conn, location).await
    }

    pub async fn update(&self, id: &str, payload: LocationPayload) -> AppResult<LocationWithChildren> {
        let changes = normalize_standalone_location(payload)?;
        let location = self.sync.update_location(id, changes).await?;
        log::info!("✅ Parada {} actualizada", id);
        Ok(location)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| AppError::database("Failed to delete location", e))?;

        LocationRepository::delete(&mut *conn, id).await?;
        log::info!("🗑️ Parada {} eliminada", id);
        Ok(())
    }
}
