use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::controllers::qr_code_controller::QrCodeController;
use crate::dto::qr_code_dto::{CreateQrCodeRequest, QrCodeQuery, UpdateQrCodeRequest};
use crate::models::QrCodeImage;
use crate::state::AppState;
use crate::utils::{AppError, AppJson};

pub fn create_qr_code_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_qr_codes).post(create_qr_code))
        .route("/:id", put(update_qr_code).delete(delete_qr_code))
}

async fn create_qr_code(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateQrCodeRequest>,
) -> Result<(StatusCode, Json<QrCodeImage>), AppError> {
    let controller = QrCodeController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_qr_codes(
    State(state): State<AppState>,
    Query(query): Query<QrCodeQuery>,
) -> Result<Json<Vec<QrCodeImage>>, AppError> {
    let controller = QrCodeController::new(state.pool.clone());
    let response = controller.list_by_location(query.location_id).await?;
    Ok(Json(response))
}

async fn update_qr_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateQrCodeRequest>,
) -> Result<Json<QrCodeImage>, AppError> {
    let controller = QrCodeController::new(state.pool.clone());
    let response = controller.update(&id, request).await?;
    Ok(Json(response))
}

async fn delete_qr_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let controller = QrCodeController::new(state.pool.clone());
    controller.delete(&id).await?;
    Ok(Json(json!({ "success": true })))
}
