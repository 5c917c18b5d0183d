//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use assethub_core::config::AppConfig;
use assethub_service::{
    AssetService, DashboardService, GroupService, NotificationService, Services, SettingsService,
};
use assethub_store::JsonStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// JSON document store
    pub store: Arc<JsonStore>,

    // ── Services ─────────────────────────────────────────────
    /// Asset management
    pub asset_service: Arc<AssetService>,
    /// Main and sub group management
    pub group_service: Arc<GroupService>,
    /// Notification preferences
    pub settings_service: Arc<SettingsService>,
    /// Reminder cycles and channel tests
    pub notification_service: Arc<NotificationService>,
    /// Dashboard counters
    pub dashboard_service: Arc<DashboardService>,
}

impl AppState {
    /// Assemble the state from already-wired services.
    pub fn new(config: Arc<AppConfig>, store: Arc<JsonStore>, services: Services) -> Self {
        Self {
            config,
            store,
            asset_service: services.assets,
            group_service: services.groups,
            settings_service: services.settings,
            notification_service: services.notifications,
            dashboard_service: services.dashboard,
        }
    }
}
