//! Backend de gestión de rutas de reparto
//!
//! API HTTP (axum) sobre SQLite (sqlx) para rutas, paradas, horarios de
//! entrega y códigos QR.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
