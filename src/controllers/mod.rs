//! Controllers
//!
//! Orquestan cada endpoint: normalizan la entrada, llaman a servicios o
//! repositorios y devuelven el resultado tipado.

pub mod location_controller;
pub mod qr_code_controller;
pub mod route_controller;
