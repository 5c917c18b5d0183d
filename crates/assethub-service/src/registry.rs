//! Wiring of repositories and services over one document store.

use std::sync::Arc;

use assethub_core::config::NotificationConfig;
use assethub_core::error::AppError;
use assethub_notify::{ChannelBuilder, ChannelFactory, Evaluator};
use assethub_store::JsonStore;
use assethub_store::repositories::{AssetRepository, GroupRepository, SettingsRepository};

use crate::asset::AssetService;
use crate::dashboard::DashboardService;
use crate::group::GroupService;
use crate::notification::NotificationService;
use crate::settings::SettingsService;

/// Every service, sharing one store.
#[derive(Debug, Clone)]
pub struct Services {
    /// Asset management.
    pub assets: Arc<AssetService>,
    /// Group management.
    pub groups: Arc<GroupService>,
    /// Notification settings.
    pub settings: Arc<SettingsService>,
    /// Reminder cycles.
    pub notifications: Arc<NotificationService>,
    /// Dashboard counters.
    pub dashboard: Arc<DashboardService>,
}

impl Services {
    /// Builds the services with real push channels.
    pub fn from_config(store: Arc<JsonStore>, config: &NotificationConfig) -> Result<Self, AppError> {
        let channels = Arc::new(ChannelFactory::new(config)?);
        Self::with_channels(store, config, channels)
    }

    /// Builds the services with the given channel builder.
    pub fn with_channels(
        store: Arc<JsonStore>,
        config: &NotificationConfig,
        channels: Arc<dyn ChannelBuilder>,
    ) -> Result<Self, AppError> {
        let evaluator = Evaluator::from_config(config)?;
        let calendar = *evaluator.calendar();

        let asset_repo = Arc::new(AssetRepository::new(Arc::clone(&store)));
        let group_repo = Arc::new(GroupRepository::new(Arc::clone(&store)));
        let settings_repo = Arc::new(SettingsRepository::new(store));

        Ok(Self {
            assets: Arc::new(AssetService::new(
                Arc::clone(&asset_repo),
                Arc::clone(&group_repo),
                calendar,
            )),
            groups: Arc::new(GroupService::new(Arc::clone(&group_repo))),
            settings: Arc::new(SettingsService::new(Arc::clone(&settings_repo))),
            notifications: Arc::new(NotificationService::new(
                Arc::clone(&asset_repo),
                Arc::clone(&settings_repo),
                evaluator,
                channels,
            )),
            dashboard: Arc::new(DashboardService::new(
                asset_repo,
                group_repo,
                settings_repo,
                calendar,
            )),
        })
    }
}
