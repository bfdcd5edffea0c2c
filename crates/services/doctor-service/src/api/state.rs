//! Application state for dependency injection.

use std::sync::Arc;

use crate::service::DoctorService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub doctor_service: Arc<dyn DoctorService>,
}

impl AppState {
    /// Create new app state.
    pub fn new(doctor_service: Arc<dyn DoctorService>) -> Self {
        Self { doctor_service }
    }
}
