//! Extractores de Axum
//!
//! `AppJson` funciona igual que `axum::Json` pero devuelve los rechazos
//! (JSON mal formado, tipos incorrectos) como `AppError::BadRequest`, para
//! que el cliente siempre reciba `{"error": "..."}`.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::utils::errors::AppError;

pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
