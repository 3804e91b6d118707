use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Día de reparto de una parada, opcionalmente acotado por fechas
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySchedule {
    pub id: String,
    pub location_id: String,
    pub day: String,
    pub mode: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}
