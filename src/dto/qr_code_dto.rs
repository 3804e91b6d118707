use serde::Deserialize;
use validator::Validate;

// Request para crear un código QR
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQrCodeRequest {
    #[validate(required, length(min = 1))]
    pub location_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub image_url: Option<String>,
    #[validate(required, length(min = 1))]
    pub destination_url: Option<String>,
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    pub position: Option<i32>,
}

// Request para actualizar un código QR (solo cambia lo que se envía)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQrCodeRequest {
    pub image_url: Option<String>,
    pub destination_url: Option<String>,
    pub title: Option<String>,
    pub position: Option<i32>,
    pub active: Option<bool>,
}

// Query de GET /qrcodes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeQuery {
    pub location_id: Option<String>,
}
