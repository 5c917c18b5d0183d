//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use assethub_core::config::AppConfig;
use assethub_core::error::AppError;
use assethub_notify::Evaluator;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration file
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let mut config = super::load_config(config_path)?;
            if let Some(secret) = config.notification.cron_secret.as_mut() {
                *secret = output::mask_secret(secret);
            }
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => print_summary(&config),
            }
        }
        ConfigCommand::Validate => {
            let config = match super::load_config(config_path) {
                Ok(config) => config,
                Err(e) => {
                    output::print_error(&format!("Configuration invalid: {}", e));
                    return Err(e);
                }
            };
            Evaluator::from_config(&config.notification)?;

            output::print_success(&format!("Configuration '{}' is valid", config_path));
            print_summary(&config);
        }
    }

    Ok(())
}

fn print_summary(config: &AppConfig) {
    output::print_kv(
        "Server",
        format!("{}:{}", config.server.host, config.server.port),
    );
    output::print_kv("Data file", config.storage.db_path().display());
    output::print_kv(
        "Scheduler",
        if config.scheduler.enabled {
            config.scheduler.cron.as_str()
        } else {
            "disabled"
        },
    );
    output::print_kv(
        "UTC offset",
        format!("{:+}h", config.notification.utc_offset_hours),
    );
    output::print_kv(
        "Trigger tolerance",
        format!("{} min", config.notification.tolerance_minutes),
    );
    output::print_kv(
        "Cron secret",
        if config.notification.cron_secret.is_some() {
            "set"
        } else {
            "not set"
        },
    );
    output::print_kv(
        "Logging",
        format!("{} ({})", config.logging.level, config.logging.format),
    );
}
