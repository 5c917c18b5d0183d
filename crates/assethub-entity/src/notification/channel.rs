//! Push channel configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The push services a reminder can be delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    /// Bark (iOS push relay).
    Bark,
    /// Telegram bot message.
    Telegram,
}

impl ChannelKind {
    /// All channel kinds, in dispatch order.
    pub const ALL: [ChannelKind; 2] = [ChannelKind::Bark, ChannelKind::Telegram];

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bark => "bark",
            Self::Telegram => "telegram",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bark server settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarkSettings {
    /// Whether Bark delivery is switched on.
    #[serde(default)]
    pub enabled: bool,
    /// Bark server base URL, e.g. `https://api.day.app`.
    #[serde(default)]
    pub server_url: String,
    /// Device key issued by the Bark app.
    #[serde(default)]
    pub device_key: String,
}

impl BarkSettings {
    /// Whether the credentials needed for a request are present.
    pub fn is_configured(&self) -> bool {
        !self.server_url.trim().is_empty() && !self.device_key.trim().is_empty()
    }
}

/// Telegram bot settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramSettings {
    /// Whether Telegram delivery is switched on.
    #[serde(default)]
    pub enabled: bool,
    /// Bot token from BotFather.
    #[serde(default)]
    pub bot_token: String,
    /// Target chat id.
    #[serde(default)]
    pub chat_id: String,
}

impl TelegramSettings {
    /// Whether the credentials needed for a request are present.
    pub fn is_configured(&self) -> bool {
        !self.bot_token.trim().is_empty() && !self.chat_id.trim().is_empty()
    }
}

/// Per-channel settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelSettings {
    /// Bark settings.
    #[serde(default)]
    pub bark: BarkSettings,
    /// Telegram settings.
    #[serde(default)]
    pub telegram: TelegramSettings,
}

impl ChannelSettings {
    /// Whether the given channel is switched on.
    pub fn is_enabled(&self, kind: ChannelKind) -> bool {
        match kind {
            ChannelKind::Bark => self.bark.enabled,
            ChannelKind::Telegram => self.telegram.enabled,
        }
    }

    /// Channels that are switched on, in dispatch order.
    pub fn enabled_kinds(&self) -> Vec<ChannelKind> {
        ChannelKind::ALL
            .into_iter()
            .filter(|k| self.is_enabled(*k))
            .collect()
    }
}
