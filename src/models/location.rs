//! Modelo de Location
//!
//! Una parada pertenece a una sola ruta. `lat`/`lng` se guardan como texto
//! porque así llegan desde el frontend.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::delivery_schedule::DeliverySchedule;
use crate::models::qr_code::QrCodeImage;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub route_id: String,
    pub code: String,
    pub name: String,
    pub address: String,
    pub contact: String,
    pub notes: String,
    pub position: i32,
    pub delivery_mode: String,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parada con sus horarios y códigos QR
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationWithChildren {
    #[serde(flatten)]
    pub location: Location,
    pub delivery_schedule: Vec<DeliverySchedule>,
    pub qr_code_images: Vec<QrCodeImage>,
}
