use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::RouteWithLocations;

// Payload de ruta tal como lo envía el frontend (POST/PUT y bulk)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub delivery: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub delivery_mode: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub locations: Option<Vec<LocationPayload>>,
}

// Payload de parada (anidado en una ruta o en PUT /locations/:id)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub delivery: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub no: Option<i32>,
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub delivery_mode: Option<String>,
    #[serde(default, deserialize_with = "super::optional_text")]
    pub lat: Option<String>,
    #[serde(default, deserialize_with = "super::optional_text")]
    pub lng: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub delivery_schedule: Option<Vec<SchedulePayload>>,
    #[serde(default)]
    pub qr_code_images: Option<Vec<QrCodePayload>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

// QR anidado en una parada; el `id` que manda el frontend se ignora
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodePayload {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub destination_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

// Query de GET /routes
#[derive(Debug, Deserialize)]
pub struct RegionQuery {
    pub region: Option<String>,
}

// Request para guardar varias rutas de una vez
#[derive(Debug, Deserialize)]
pub struct BulkSaveRequest {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub routes: Vec<RoutePayload>,
}

// Resultado individual del guardado masivo
#[derive(Debug, Serialize)]
pub struct BulkSaveResult {
    pub index: usize,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteWithLocations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BulkSaveResponse {
    pub results: Vec<BulkSaveResult>,
}

// Response de ruta en forma de presentación (GET)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDisplay {
    pub id: String,
    pub code: String,
    pub location: String,
    pub delivery: String,
    pub shift: String,
    pub delivery_mode: String,
    pub region: String,
    pub active: bool,
    pub last_update_time: DateTime<Utc>,
    pub locations: Vec<LocationDisplay>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDisplay {
    pub id: String,
    pub no: i32,
    pub code: String,
    pub location: String,
    pub delivery: String,
    pub delivery_mode: String,
    pub lat: String,
    pub lng: String,
    pub qr_code_images: Vec<QrCodeDisplay>,
    // Campos crudos para edición
    pub name: String,
    pub address: String,
    pub contact: String,
    pub notes: String,
    pub position: i32,
    pub active: bool,
    pub delivery_schedule: Vec<ScheduleDisplay>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeDisplay {
    pub id: String,
    pub image_url: String,
    pub destination_url: String,
    pub title: String,
    pub position: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDisplay {
    pub day: String,
    pub mode: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
