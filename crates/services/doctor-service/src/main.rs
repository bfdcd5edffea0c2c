//! Doctor Service - HTTP API for doctor records.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doctor_service_lib::{config::DoctorServiceConfig, MigrateAction};

#[derive(Parser)]
#[command(name = "doctor-service")]
#[command(about = "Doctor records microservice")]
#[command(version)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind (overrides DOCTOR_SERVICE_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides DOCTOR_SERVICE_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateCommands> for MigrateAction {
    fn from(command: MigrateCommands) -> Self {
        match command {
            MigrateCommands::Up => MigrateAction::Up,
            MigrateCommands::Down => MigrateAction::Down,
            MigrateCommands::Status => MigrateAction::Status,
            MigrateCommands::Fresh => MigrateAction::Fresh,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Loads .env before RUST_LOG is read
    let config = DoctorServiceConfig::from_env();

    init_tracing(log_filter(cli.verbose, &config.service.log_level));
    tracing::debug!("Configuration loaded: {:?}", config);

    let result = match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.service.host.clone());
            let port = port.unwrap_or(config.service.port);
            doctor_service_lib::run_server(config.with_addr(host, port)).await
        }
        Commands::Migrate { action } => {
            doctor_service_lib::run_migrations(action.into(), &config).await
        }
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Filter directive: `--verbose` wins over the configured level.
fn log_filter(verbose: bool, log_level: &str) -> String {
    if verbose {
        "debug".to_string()
    } else {
        log_level.to_string()
    }
}

/// Initialize tracing subscriber
fn init_tracing(filter: String) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
