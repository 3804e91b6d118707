//! Módulo de base de datos
//!
//! Maneja la conexión, migraciones y datos de ejemplo en SQLite

pub mod connection;
pub mod seed;

pub use connection::DatabaseConnection;
