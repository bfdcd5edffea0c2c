//! HTTP request handlers.

pub mod doctor_handler;
pub mod health_handler;

pub use doctor_handler::doctor_routes;
pub use health_handler::health_routes;
