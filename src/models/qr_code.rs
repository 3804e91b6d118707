use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Imagen de código QR asociada a una parada
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeImage {
    pub id: String,
    pub location_id: String,
    pub image_url: String,
    pub destination_url: String,
    pub title: String,
    pub position: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
