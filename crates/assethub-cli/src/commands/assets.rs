//! Asset inspection CLI commands.

use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use assethub_core::error::AppError;
use assethub_core::types::id::AssetId;
use assethub_service::asset::{AssetListing, DueItem};

use crate::output::{self, OutputFormat};

/// Arguments for asset commands
#[derive(Debug, Args)]
pub struct AssetsArgs {
    /// Asset subcommand
    #[command(subcommand)]
    pub command: AssetsCommand,
}

/// Asset subcommands
#[derive(Debug, Subcommand)]
pub enum AssetsCommand {
    /// List all assets, newest first
    List {
        /// Only show assets whose earliest expiry has passed
        #[arg(long)]
        expired: bool,
    },
    /// Show the due dates found in one asset
    Items {
        /// Asset ID
        id: AssetId,
    },
}

/// Asset display row for table output
#[derive(Debug, Serialize, Tabled)]
struct AssetRow {
    /// Asset ID
    id: u64,
    /// Name
    name: String,
    /// Main group / sub group
    group: String,
    /// Earliest expiry
    expiry: String,
    /// Expired
    expired: bool,
    /// Reminders enabled
    notify: bool,
}

impl From<&AssetListing> for AssetRow {
    fn from(listing: &AssetListing) -> Self {
        let main = listing.main_group.as_ref().map(|g| g.name.as_str());
        let sub = listing.sub_group.as_ref().map(|g| g.name.as_str());
        Self {
            id: listing.asset.id.get(),
            name: listing.asset.name.clone(),
            group: format!("{} / {}", main.unwrap_or("?"), sub.unwrap_or("?")),
            expiry: output::or_dash(listing.earliest_expiry),
            expired: listing.expired,
            notify: listing.asset.expiry_notify,
        }
    }
}

/// Due item display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ItemRow {
    /// Segment label
    label: String,
    /// Expiry date
    date: String,
    /// Days remaining
    days: i64,
    /// Status
    status: String,
}

impl From<&DueItem> for ItemRow {
    fn from(item: &DueItem) -> Self {
        Self {
            label: output::or_dash(item.label.as_deref()),
            date: item.date.to_string(),
            days: item.days_remaining,
            status: item.status.clone(),
        }
    }
}

/// Execute asset commands
pub async fn execute(
    args: &AssetsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let services = super::open_services(&config).await?;

    match &args.command {
        AssetsCommand::List { expired } => {
            let listings = services.assets.list_assets(Utc::now()).await?;
            let rows: Vec<AssetRow> = listings
                .iter()
                .filter(|l| !expired || l.expired)
                .map(AssetRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        AssetsCommand::Items { id } => {
            let items = services.assets.due_items(*id, Utc::now()).await?;
            let rows: Vec<ItemRow> = items.iter().map(ItemRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
