//! Application services.

mod doctor_service;

pub use doctor_service::{DoctorManager, DoctorService};
