//! # assethub-service
//!
//! Business logic service layer for AssetHub. Each service wraps one or
//! more repositories over the shared JSON document and implements an
//! application-level use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod asset;
pub mod dashboard;
pub mod group;
pub mod notification;
pub mod registry;
pub mod settings;

pub use asset::AssetService;
pub use dashboard::DashboardService;
pub use group::GroupService;
pub use notification::{CheckOptions, CycleGuard, CycleOutcome, NotificationService, TestOutcome};
pub use registry::Services;
pub use settings::SettingsService;

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixture: a temp store with one main group and one sub group.

    use std::sync::{Arc, Mutex};

    use assethub_core::config::NotificationConfig;
    use assethub_core::types::{MainGroupId, SubGroupId};
    use assethub_entity::ChannelKind;
    use assethub_entity::notification::ChannelSettings;
    use assethub_notify::{ChannelBuilder, ChannelSet, NotificationChannel, NotificationMessage};
    use assethub_store::JsonStore;

    use crate::group::CreateSubGroupRequest;
    use crate::registry::Services;

    /// Records message bodies and answers with a fixed result.
    #[derive(Debug)]
    pub struct RecordingChannel {
        kind: ChannelKind,
        result: bool,
        sent: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl NotificationChannel for RecordingChannel {
        fn kind(&self) -> ChannelKind {
            self.kind
        }

        async fn send(&self, message: &NotificationMessage) -> bool {
            self.sent.lock().unwrap().push(message.body.clone());
            self.result
        }
    }

    /// Builds [`RecordingChannel`]s for the enabled kinds.
    #[derive(Debug, Clone)]
    pub struct RecordingChannels {
        result: bool,
        sent: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingChannels {
        /// Bodies sent by any channel, in order.
        pub fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl ChannelBuilder for RecordingChannels {
        fn build(&self, settings: &ChannelSettings) -> ChannelSet {
            ChannelSet::new(
                settings
                    .enabled_kinds()
                    .into_iter()
                    .map(|kind| {
                        Arc::new(RecordingChannel {
                            kind,
                            result: self.result,
                            sent: Arc::clone(&self.sent),
                        }) as Arc<dyn NotificationChannel>
                    })
                    .collect(),
            )
        }
    }

    pub struct Fixture {
        _dir: tempfile::TempDir,
        pub channels: RecordingChannels,
        pub assets: Arc<crate::AssetService>,
        pub groups: Arc<crate::GroupService>,
        pub settings: Arc<crate::SettingsService>,
        pub notifications: Arc<crate::NotificationService>,
        pub dashboard: Arc<crate::DashboardService>,
        pub main_id: MainGroupId,
        pub sub_id: SubGroupId,
    }

    impl Fixture {
        pub async fn new() -> Self {
            Self::with_channel_result(true).await
        }

        pub async fn with_channel_result(result: bool) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let store = Arc::new(JsonStore::at(dir.path().join("db.json")).await.unwrap());
            let channels = RecordingChannels {
                result,
                sent: Arc::new(Mutex::new(Vec::new())),
            };
            let services = Services::with_channels(
                store,
                &NotificationConfig::default(),
                Arc::new(channels.clone()),
            )
            .unwrap();

            let main = services
                .groups
                .create_main_group("Cloud".into(), None)
                .await
                .unwrap();
            let sub = services
                .groups
                .create_sub_group(
                    main.id,
                    CreateSubGroupRequest {
                        name: "VPS".into(),
                        icon: None,
                        config: "[]".into(),
                    },
                )
                .await
                .unwrap();

            Self {
                _dir: dir,
                channels,
                assets: services.assets,
                groups: services.groups,
                settings: services.settings,
                notifications: services.notifications,
                dashboard: services.dashboard,
                main_id: main.id,
                sub_id: sub.id,
            }
        }
    }
}
