//! AssetHub Server: asset inventory with expiry reminders.
//!
//! Main entry point that loads configuration, installs logging and starts
//! the HTTP server together with the reminder scheduler.

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use assethub_core::config::AppConfig;
use assethub_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = assethub_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
///
/// `ASSETHUB_CONFIG` names an explicit file; otherwise `config/default.toml`
/// is merged with the `config/{ASSETHUB_ENV}.toml` overlay.
fn load_configuration() -> Result<AppConfig, AppError> {
    if let Ok(path) = std::env::var("ASSETHUB_CONFIG") {
        return AppConfig::load_file(&path);
    }

    let env = std::env::var("ASSETHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }

    tracing::info!(
        level = %config.logging.level,
        format = %config.logging.format,
        "Logging initialized"
    );
}
