//! Bark push channel.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use assethub_entity::ChannelKind;
use assethub_entity::notification::BarkSettings;

use super::NotificationChannel;
use crate::message::NotificationMessage;

/// Sound requested for every Bark push.
const BARK_SOUND: &str = "alarm";

#[derive(Debug, Serialize)]
struct BarkPayload<'a> {
    title: &'a str,
    body: &'a str,
    group: &'a str,
    sound: &'a str,
}

/// Delivers messages to a Bark server.
#[derive(Debug, Clone)]
pub struct BarkChannel {
    client: reqwest::Client,
    settings: BarkSettings,
    group: String,
}

impl BarkChannel {
    /// Create a Bark channel.
    pub fn new(client: reqwest::Client, settings: BarkSettings, group: String) -> Self {
        Self {
            client,
            settings,
            group,
        }
    }

    /// Push endpoint: `{server}/{device_key}`.
    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.settings.server_url.trim().trim_end_matches('/'),
            self.settings.device_key.trim()
        )
    }
}

#[async_trait]
impl NotificationChannel for BarkChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Bark
    }

    async fn send(&self, message: &NotificationMessage) -> bool {
        if !self.settings.is_configured() {
            warn!("Bark is enabled but server URL or device key is missing");
            return false;
        }

        let payload = BarkPayload {
            title: &message.title,
            body: &message.body,
            group: &self.group,
            sound: BARK_SOUND,
        };

        match self.client.post(self.endpoint()).json(&payload).send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!(status = %resp.status(), "Bark push delivered");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Bark push rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "Bark push failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::testing::PushServer;
    use axum::http::StatusCode;

    fn channel(server_url: &str, device_key: &str) -> BarkChannel {
        BarkChannel::new(
            reqwest::Client::new(),
            BarkSettings {
                enabled: true,
                server_url: server_url.to_string(),
                device_key: device_key.to_string(),
            },
            "Asset expiry".to_string(),
        )
    }

    #[tokio::test]
    async fn test_posts_payload_to_device_path() {
        let server = PushServer::start(StatusCode::OK).await;
        let bark = channel(&format!("{}/", server.base_url), "device-1");

        let ok = bark
            .send(&NotificationMessage::new("Title", "Body text"))
            .await;
        assert!(ok);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/device-1");
        assert_eq!(requests[0].body["title"], "Title");
        assert_eq!(requests[0].body["body"], "Body text");
        assert_eq!(requests[0].body["group"], "Asset expiry");
        assert_eq!(requests[0].body["sound"], "alarm");
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let server = PushServer::start(StatusCode::BAD_REQUEST).await;
        let bark = channel(&server.base_url, "device-1");
        assert!(!bark.send(&NotificationMessage::test()).await);
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_credentials_skip_request() {
        let server = PushServer::start(StatusCode::OK).await;
        let bark = channel(&server.base_url, "  ");
        assert!(!bark.send(&NotificationMessage::test()).await);
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_failure() {
        let bark = channel("http://127.0.0.1:1", "device-1");
        assert!(!bark.send(&NotificationMessage::test()).await);
    }
}
