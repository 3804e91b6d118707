use sqlx::SqlitePool;
use validator::Validate;

use crate::dto::qr_code_dto::{CreateQrCodeRequest, UpdateQrCodeRequest};
use crate::models::QrCodeImage;
use crate::repositories::{LocationRepository, QrCodeRepository};
use crate::services::field_normalizer::{normalize_qr_code_patch, NewQrCode};
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

const REQUIRED_QR_FIELDS: &str = "locationId, imageUrl, destinationUrl, and title are required";

pub struct QrCodeController {
    pool: SqlitePool,
}

impl QrCodeController {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn connection(
        &self,
        message: &str,
    ) -> AppResult<sqlx::pool::PoolConnection<sqlx::Sqlite>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| AppError::database(message, e))
    }

    pub async fn create(&self, request: CreateQrCodeRequest) -> AppResult<QrCodeImage> {
        if request.validate().is_err() {
            return Err(bad_request_error(REQUIRED_QR_FIELDS));
        }

        let (location_id, image_url, destination_url, title) = match (
            request.location_id,
            request.image_url,
            request.destination_url,
            request.title,
        ) {
            (Some(l), Some(i), Some(d), Some(t)) => (l, i, d, t),
            _ => return Err(bad_request_error(REQUIRED_QR_FIELDS)),
        };

        let mut conn = self.connection("Failed to create QR code").await?;

        if LocationRepository::find_by_id(&mut *conn, &location_id)
            .await?
            .is_none()
        {
            return Err(not_found_error("Location", &location_id));
        }

        let qr_code = NewQrCode {
            image_url,
            destination_url,
            title,
            position: request.position.unwrap_or(0),
            active: true,
        };

        let created = QrCodeRepository::create(&mut *conn, &location_id, &qr_code).await?;
        log::info!("✅ QR {} creado para la parada {}", created.id, location_id);
        Ok(created)
    }

    pub async fn list_by_location(&self, location_id: Option<String>) -> AppResult<Vec<QrCodeImage>> {
        let location_id = location_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| bad_request_error("locationId parameter is required"))?;

        let mut conn = self.connection("Failed to fetch QR codes").await?;
        QrCodeRepository::find_by_location(&mut *conn, &location_id).await
    }

    pub async fn update(&self, id: &str, request: UpdateQrCodeRequest) -> AppResult<QrCodeImage> {
        let patch = normalize_qr_code_patch(request);
        let mut conn = self.connection("Failed to update QR code").await?;
        QrCodeRepository::update(&mut *conn, id, &patch).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut conn = self.connection("Failed to delete QR code").await?;
        QrCodeRepository::delete(&mut *conn, id).await?;
        log::info!("🗑️ QR {} eliminado", id);
        Ok(())
    }
}
