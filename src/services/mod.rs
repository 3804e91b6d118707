//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: traducción de
//! alias, reconciliación de paradas y transformación a la forma del frontend.

pub mod field_normalizer;
pub mod route_sync_service;
pub mod route_transformer;

pub use route_sync_service::RouteSyncService;
