//! Manual reminder cycle and channel test.

use chrono::Utc;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use assethub_api::dto::response::{CheckResponse, TestResponse};
use assethub_core::error::AppError;
use assethub_notify::NotificationResult;
use assethub_service::CheckOptions;
use assethub_service::notification::ChannelTestResult;

use crate::output::{self, OutputFormat};

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Ignore the daily trigger window
    #[arg(long)]
    pub force: bool,

    /// Clear the de-duplication ledger first
    #[arg(long)]
    pub reset: bool,
}

/// Reminder display row for table output
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Asset ID
    id: u64,
    /// Asset name
    asset: String,
    /// Segment label
    label: String,
    /// Days remaining
    days: i64,
    /// Bark delivered
    bark: bool,
    /// Telegram delivered
    telegram: bool,
}

impl From<&NotificationResult> for NotificationRow {
    fn from(n: &NotificationResult) -> Self {
        Self {
            id: n.asset_id.get(),
            asset: n.asset_name.clone(),
            label: output::or_dash(n.label.as_deref()),
            days: n.days_remaining,
            bark: n.results.bark,
            telegram: n.results.telegram,
        }
    }
}

/// Execute the check command
pub async fn execute(
    args: &CheckArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let services = super::open_services(&config).await?;

    let options = CheckOptions {
        force: args.force,
        reset: args.reset,
    };
    let outcome = services
        .notifications
        .run_guarded(Utc::now(), options)
        .await?;
    let response = CheckResponse::from(outcome);

    if format == OutputFormat::Json {
        output::print_json(&response);
        return Ok(());
    }

    if response.success {
        output::print_success(&response.message);
    } else {
        output::print_warning(&response.message);
    }

    if let Some(debug) = &response.debug {
        output::print_kv("Business time", &debug.window.business_time);
        output::print_kv("Target time", &debug.window.target_time);
        output::print_kv("Minutes from target", debug.window.time_diff);
        output::print_kv("In window", debug.window.in_window);
        output::print_kv("Assets with expiry", debug.assets_with_expiry);
    }

    if !response.notifications.is_empty() {
        let rows: Vec<NotificationRow> = response
            .notifications
            .iter()
            .map(NotificationRow::from)
            .collect();
        output::print_list(&rows, format);
    }

    Ok(())
}

/// Execute the test command
pub async fn execute_test(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let services = super::open_services(&config).await?;

    let response = TestResponse::from(services.notifications.send_test().await?);

    if format == OutputFormat::Json {
        output::print_json(&response);
        return Ok(());
    }

    let Some(results) = response.results else {
        output::print_warning(&response.message);
        return Ok(());
    };

    output::print_success(&response.message);
    output::print_kv("Bark", describe(results.bark));
    output::print_kv("Telegram", describe(results.telegram));
    Ok(())
}

fn describe(result: ChannelTestResult) -> &'static str {
    match (result.enabled, result.success) {
        (false, _) => "disabled",
        (true, true) => "delivered",
        (true, false) => "failed",
    }
}
