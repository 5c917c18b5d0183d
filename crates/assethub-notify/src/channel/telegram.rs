//! Telegram bot channel.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use assethub_entity::ChannelKind;
use assethub_entity::notification::TelegramSettings;

use super::NotificationChannel;
use crate::message::NotificationMessage;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'a str,
}

/// Delivers messages through the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramChannel {
    client: reqwest::Client,
    settings: TelegramSettings,
    api_base: String,
}

impl TelegramChannel {
    /// Create a Telegram channel against `api_base` (normally `https://api.telegram.org`).
    pub fn new(client: reqwest::Client, settings: TelegramSettings, api_base: String) -> Self {
        Self {
            client,
            settings,
            api_base,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.settings.bot_token.trim()
        )
    }

    /// Message text as shown in the chat, escaped for HTML parse mode.
    pub fn render(message: &NotificationMessage) -> String {
        format!(
            "🔔 {}\n\n{}",
            escape_html(&message.title),
            escape_html(&message.body)
        )
    }
}

/// Escapes the characters Telegram's HTML parser treats as markup.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Telegram
    }

    async fn send(&self, message: &NotificationMessage) -> bool {
        if !self.settings.is_configured() {
            warn!("Telegram is enabled but bot token or chat id is missing");
            return false;
        }

        let payload = SendMessage {
            chat_id: self.settings.chat_id.trim(),
            text: Self::render(message),
            parse_mode: "HTML",
        };

        match self.client.post(self.endpoint()).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!(status = %resp.status(), "Telegram message delivered");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Telegram message rejected");
                false
            }
            Err(e) => {
                // reqwest errors carry the URL, which contains the bot token.
                warn!(error = %e.without_url(), "Telegram message failed");
                false
            }
        }
    }
}
