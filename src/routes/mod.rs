//! Rutas HTTP
//!
//! Cada submódulo expone un `Router<AppState>` que se monta bajo `/api`.

pub mod location_routes;
pub mod qr_code_routes;
pub mod route_routes;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación con CORS, compresión y trazas HTTP
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/routes", route_routes::create_route_router())
        .nest("/api/locations", location_routes::create_location_router())
        .nest("/api/qrcodes", qr_code_routes::create_qr_code_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
