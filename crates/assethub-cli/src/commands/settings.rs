//! Notification settings and ledger CLI commands.

use clap::{Args, Subcommand};

use assethub_core::error::AppError;
use assethub_entity::NotificationSettings;

use crate::output::{self, OutputFormat};

/// Arguments for settings commands
#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings subcommand
    #[command(subcommand)]
    pub command: SettingsCommand,
}

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show the current notification settings
    Show,
}

/// Arguments for ledger commands
#[derive(Debug, Args)]
pub struct LedgerArgs {
    /// Ledger subcommand
    #[command(subcommand)]
    pub command: LedgerCommand,
}

/// Ledger subcommands
#[derive(Debug, Subcommand)]
pub enum LedgerCommand {
    /// Forget every record, so due items are reminded again today
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute settings commands
pub async fn execute(
    args: &SettingsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let services = super::open_services(&config).await?;

    match &args.command {
        SettingsCommand::Show => {
            let settings = services.settings.get_settings().await?;
            match format {
                OutputFormat::Json => output::print_json(&masked(settings)),
                OutputFormat::Table => print_settings(&settings),
            }
        }
    }

    Ok(())
}

/// Execute ledger commands
pub async fn execute_ledger(args: &LedgerArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let services = super::open_services(&config).await?;

    match &args.command {
        LedgerCommand::Clear { yes } => {
            if !yes {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt("Clear the notification ledger? Due items will be reminded again.")
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Aborted.");
                    return Ok(());
                }
            }

            let removed = services.settings.clear_ledger().await?;
            output::print_success(&format!("Removed {} ledger entries", removed));
        }
    }

    Ok(())
}

fn masked(mut settings: NotificationSettings) -> NotificationSettings {
    settings.channels.bark.device_key = output::mask_secret(&settings.channels.bark.device_key);
    settings.channels.telegram.bot_token =
        output::mask_secret(&settings.channels.telegram.bot_token);
    settings
}

fn print_settings(settings: &NotificationSettings) {
    println!("Notification settings:");
    output::print_kv("Enabled", settings.enabled);
    output::print_kv("Days before expiry", settings.days_before_expiry);
    output::print_kv("Notification time", &settings.notification_time);
    output::print_kv(
        "Last reminder sent",
        output::or_dash(
            chrono::DateTime::from_timestamp_millis(settings.last_notification_check)
                .filter(|_| settings.last_notification_check > 0),
        ),
    );
    output::print_kv("Ledger entries", settings.notified_assets.len());

    let bark = &settings.channels.bark;
    println!("Bark:");
    output::print_kv("Enabled", bark.enabled);
    output::print_kv("Server", &bark.server_url);
    output::print_kv("Device key", output::mask_secret(&bark.device_key));

    let telegram = &settings.channels.telegram;
    println!("Telegram:");
    output::print_kv("Enabled", telegram.enabled);
    output::print_kv("Bot token", output::mask_secret(&telegram.bot_token));
    output::print_kv("Chat ID", &telegram.chat_id);
}
