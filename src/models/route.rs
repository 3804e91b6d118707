//! Modelo de Route
//!
//! Este módulo contiene el struct Route tal como se guarda en la tabla
//! `routes`, y el árbol completo (ruta + paradas + hijos) que devuelven
//! los endpoints de escritura.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::location::LocationWithChildren;

/// Route principal - mapea exactamente a la tabla routes
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: String,
    pub shift: String,
    pub delivery_mode: String,
    pub region: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ruta con sus paradas ordenadas por posición
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteWithLocations {
    #[serde(flatten)]
    pub route: Route,
    pub locations: Vec<LocationWithChildren>,
}
