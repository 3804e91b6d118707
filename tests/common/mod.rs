//! Utilidades comunes para los tests de integración

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use delivery_routes::config::{DatabaseConfig, EnvironmentConfig};
use delivery_routes::database::DatabaseConnection;
use delivery_routes::{create_router, AppState};

/// App de pruebas sobre una base SQLite en memoria con migraciones aplicadas
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = DatabaseConnection::new(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory database");
        let pool = db.pool().clone();

        let state = AppState::new(pool.clone(), EnvironmentConfig::default());

        Self {
            router: create_router(state),
            pool,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Crea una ruta y devuelve el cuerpo de la respuesta (201)
    pub async fn create_route(&self, body: Value) -> Value {
        let (status, created) = self.post("/api/routes", body).await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", created);
        created
    }
}

/// Id de la parada en la posición `index` de una ruta devuelta por la API
pub fn location_id(route: &Value, index: usize) -> String {
    route["locations"][index]["id"]
        .as_str()
        .expect("location id")
        .to_string()
}
