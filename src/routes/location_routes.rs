use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::location_controller::LocationController;
use crate::dto::route_dto::LocationPayload;
use crate::models::LocationWithChildren;
use crate::state::AppState;
use crate::utils::{AppError, AppJson};

pub fn create_location_router() -> Router<AppState> {
    Router::new().route(
        "/:id",
        get(get_location).put(update_location).delete(delete_location),
    )
}

async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LocationWithChildren>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<LocationPayload>,
) -> Result<Json<LocationWithChildren>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    let response = controller.update(&id, payload).await?;
    Ok(Json(response))
}

async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let controller = LocationController::new(state.pool.clone());
    controller.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}
