//! Doctor Service Library
//!
//! Persistence, validation and an HTTP API for doctor records.
//! The binary in `main.rs` is a thin CLI over [`run_server`] and [`run_migrations`].

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::DoctorServiceConfig;
use crate::infra::Database;
use crate::repository::DoctorStore;
use crate::service::DoctorManager;

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    action: MigrateAction,
    config: &DoctorServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: DoctorServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Create repository and service
    let doctor_repo = Arc::new(DoctorStore::new(db.get_connection()));
    let doctor_service = Arc::new(DoctorManager::new(doctor_repo));

    let app = create_router(AppState::new(doctor_service));

    let addr = config.service.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("{} listening on {}", config.service.service_name, addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
