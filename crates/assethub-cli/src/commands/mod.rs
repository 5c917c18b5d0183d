//! CLI command definitions and dispatch.

pub mod assets;
pub mod check;
pub mod config;
pub mod serve;
pub mod settings;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use assethub_core::config::AppConfig;
use assethub_core::error::AppError;
use assethub_service::Services;
use assethub_store::JsonStore;

use crate::output::OutputFormat;

/// AssetHub: asset inventory with expiry reminders
#[derive(Debug, Parser)]
#[command(name = "assethub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the AssetHub server
    Serve(serve::ServeArgs),
    /// Run one reminder cycle now
    Check(check::CheckArgs),
    /// Send the test message to every enabled channel
    Test,
    /// Inspect assets
    Assets(assets::AssetsArgs),
    /// Notification settings
    Settings(settings::SettingsArgs),
    /// De-duplication ledger
    Ledger(settings::LedgerArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Check(args) => check::execute(args, &self.config, self.format).await,
            Commands::Test => check::execute_test(&self.config, self.format).await,
            Commands::Assets(args) => assets::execute(args, &self.config, self.format).await,
            Commands::Settings(args) => settings::execute(args, &self.config, self.format).await,
            Commands::Ledger(args) => settings::execute_ledger(args, &self.config).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_file(config_path)
        .map_err(|e| AppError::configuration(format!("Failed to load config: {}", e)))
}

/// Helper: open the document store and wire the services
pub async fn open_services(config: &AppConfig) -> Result<Services, AppError> {
    let store = Arc::new(JsonStore::open(&config.storage).await?);
    Services::from_config(store, &config.notification)
}
