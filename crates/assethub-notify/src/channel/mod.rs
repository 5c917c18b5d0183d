//! Push delivery channels.
//!
//! Each channel turns a [`NotificationMessage`] into one HTTP request and
//! reports plain success or failure. There is no retry; failures are logged
//! and returned as `false`.

pub mod bark;
pub mod telegram;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use assethub_core::config::NotificationConfig;
use assethub_core::error::{AppError, ErrorKind};
use assethub_core::result::AppResult;
use assethub_entity::ChannelKind;
use assethub_entity::notification::ChannelSettings;

use crate::message::NotificationMessage;

pub use bark::BarkChannel;
pub use telegram::TelegramChannel;

/// A push service that can deliver a message.
#[async_trait]
pub trait NotificationChannel: Send + Sync + fmt::Debug {
    /// Which service this is.
    fn kind(&self) -> ChannelKind;

    /// Deliver a message. Returns `true` on a 2xx answer.
    async fn send(&self, message: &NotificationMessage) -> bool;
}

/// Per-channel outcome of one delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryResults {
    /// Bark succeeded.
    pub bark: bool,
    /// Telegram succeeded.
    pub telegram: bool,
}

impl DeliveryResults {
    /// Record the outcome for one channel.
    pub fn set(&mut self, kind: ChannelKind, ok: bool) {
        match kind {
            ChannelKind::Bark => self.bark = ok,
            ChannelKind::Telegram => self.telegram = ok,
        }
    }

    /// Outcome for one channel.
    pub fn get(&self, kind: ChannelKind) -> bool {
        match kind {
            ChannelKind::Bark => self.bark,
            ChannelKind::Telegram => self.telegram,
        }
    }

    /// Whether any channel succeeded.
    pub fn any(&self) -> bool {
        self.bark || self.telegram
    }
}

/// The channels enabled for one cycle.
#[derive(Debug, Clone, Default)]
pub struct ChannelSet {
    channels: Vec<Arc<dyn NotificationChannel>>,
}

impl ChannelSet {
    /// Wrap an explicit list of channels.
    pub fn new(channels: Vec<Arc<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    /// Whether no channel is enabled.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Kinds of the contained channels.
    pub fn kinds(&self) -> Vec<ChannelKind> {
        self.channels.iter().map(|c| c.kind()).collect()
    }

    /// Send to every channel concurrently. One channel failing does not
    /// affect the others.
    pub async fn send_all(&self, message: &NotificationMessage) -> DeliveryResults {
        let sends = self.channels.iter().map(|channel| async move {
            (channel.kind(), channel.send(message).await)
        });

        let mut results = DeliveryResults::default();
        for (kind, ok) in futures::future::join_all(sends).await {
            results.set(kind, ok);
        }
        results
    }
}

/// Turns channel settings into the set of channels for one cycle.
pub trait ChannelBuilder: Send + Sync + fmt::Debug {
    /// Channels switched on in `settings`, in dispatch order.
    fn build(&self, settings: &ChannelSettings) -> ChannelSet;
}

/// Builds channels from the user's settings with a shared HTTP client.
#[derive(Debug, Clone)]
pub struct ChannelFactory {
    client: reqwest::Client,
    telegram_api_base: String,
    bark_group: String,
}

impl ChannelFactory {
    /// Create a factory from the deployment configuration.
    pub fn new(config: &NotificationConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            telegram_api_base: config.telegram_api_base.clone(),
            bark_group: config.bark_group.clone(),
        })
    }
}

impl ChannelBuilder for ChannelFactory {
    fn build(&self, settings: &ChannelSettings) -> ChannelSet {
        let mut channels: Vec<Arc<dyn NotificationChannel>> = Vec::new();
        if settings.bark.enabled {
            channels.push(Arc::new(BarkChannel::new(
                self.client.clone(),
                settings.bark.clone(),
                self.bark_group.clone(),
            )));
        }
        if settings.telegram.enabled {
            channels.push(Arc::new(TelegramChannel::new(
                self.client.clone(),
                settings.telegram.clone(),
                self.telegram_api_base.clone(),
            )));
        }
        ChannelSet::new(channels)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedChannel;
    use super::*;
    use assethub_entity::notification::{BarkSettings, TelegramSettings};

    #[tokio::test]
    async fn test_one_failure_does_not_block_other() {
        let bark = ScriptedChannel::new(ChannelKind::Bark, false);
        let telegram = ScriptedChannel::new(ChannelKind::Telegram, true);
        let set = ChannelSet::new(vec![
            bark.clone() as Arc<dyn NotificationChannel>,
            telegram.clone() as Arc<dyn NotificationChannel>,
        ]);

        let results = set.send_all(&NotificationMessage::test()).await;
        assert_eq!(
            results,
            DeliveryResults {
                bark: false,
                telegram: true
            }
        );
        assert!(results.any());
        assert_eq!(bark.calls(), 1);
        assert_eq!(telegram.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_set_reports_nothing() {
        let results = ChannelSet::default()
            .send_all(&NotificationMessage::test())
            .await;
        assert!(!results.any());
    }

    #[test]
    fn test_factory_builds_enabled_channels_only() {
        let factory = ChannelFactory::new(&NotificationConfig::default()).unwrap();
        let settings = ChannelSettings {
            bark: BarkSettings {
                enabled: false,
                ..Default::default()
            },
            telegram: TelegramSettings {
                enabled: true,
                ..Default::default()
            },
        };
        assert_eq!(factory.build(&settings).kinds(), vec![ChannelKind::Telegram]);
        assert!(factory.build(&ChannelSettings::default()).is_empty());
    }
}
