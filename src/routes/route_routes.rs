use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{BulkSaveRequest, BulkSaveResponse, RegionQuery, RouteDisplay, RoutePayload};
use crate::models::RouteWithLocations;
use crate::state::AppState;
use crate::utils::{AppError, AppJson};

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route("/bulk", post(bulk_save_routes))
        .route("/:id", get(get_route).put(update_route).delete(delete_route))
}

async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<RegionQuery>,
) -> Result<Json<Vec<RouteDisplay>>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.list_by_region(query.region).await?;
    Ok(Json(response))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RouteDisplay>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn create_route(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RoutePayload>,
) -> Result<(StatusCode, Json<RouteWithLocations>), AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.create(payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<RoutePayload>,
) -> Result<Json<RouteWithLocations>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.update(&id, payload).await?;
    Ok(Json(response))
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    controller.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}

async fn bulk_save_routes(
    State(state): State<AppState>,
    AppJson(request): AppJson<BulkSaveRequest>,
) -> Result<Json<BulkSaveResponse>, AppError> {
    let controller = RouteController::new(state.pool.clone());
    let response = controller.bulk_save(request.region, request.routes).await?;
    Ok(Json(response))
}
