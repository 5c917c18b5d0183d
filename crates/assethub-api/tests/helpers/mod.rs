//! Shared test helpers for API tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use assethub_api::{AppState, build_app};
use assethub_core::config::AppConfig;
use assethub_entity::ChannelKind;
use assethub_entity::notification::ChannelSettings;
use assethub_notify::{ChannelBuilder, ChannelSet, NotificationChannel, NotificationMessage};
use assethub_service::{NotificationService, Services};
use assethub_store::JsonStore;

/// Channel that records the message body and always succeeds.
#[derive(Debug)]
struct RecordingChannel {
    kind: ChannelKind,
    sent: Arc<Mutex<Vec<(ChannelKind, String)>>>,
}

#[async_trait::async_trait]
impl NotificationChannel for RecordingChannel {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    async fn send(&self, message: &NotificationMessage) -> bool {
        self.sent
            .lock()
            .unwrap()
            .push((self.kind, message.body.clone()));
        true
    }
}

#[derive(Debug, Clone, Default)]
struct RecordingChannels {
    sent: Arc<Mutex<Vec<(ChannelKind, String)>>>,
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
                        sent: Arc::clone(&self.sent),
                    }) as Arc<dyn NotificationChannel>
                })
                .collect(),
        )
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Notification service, for holding the cycle guard
    pub notifications: Arc<NotificationService>,
    channels: RecordingChannels,
    _dir: tempfile::TempDir,
}

impl TestApp {
    /// Create a new test application over an empty temp store
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application with a custom configuration
    pub async fn with_config(mut config: AppConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        config.storage.data_dir = dir.path().display().to_string();

        let store = Arc::new(
            JsonStore::open(&config.storage)
                .await
                .expect("Failed to open store"),
        );
        let channels = RecordingChannels::default();
        let services = Services::with_channels(
            Arc::clone(&store),
            &config.notification,
            Arc::new(channels.clone()),
        )
        .expect("Failed to build services");
        let notifications = Arc::clone(&services.notifications);

        let cors = config.server.cors.clone();
        let state = AppState::new(Arc::new(config), store, services);

        Self {
            router: build_app(state, &cors),
            notifications,
            channels,
            _dir: dir,
        }
    }

    /// Messages delivered so far
    pub fn sent(&self) -> Vec<(ChannelKind, String)> {
        self.channels.sent.lock().unwrap().clone()
    }

    /// Make a JSON request
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a main group "Cloud" with sub group "VPS"; returns their ids
    pub async fn seed_groups(&self) -> (u64, u64) {
        let main = self
            .request(
                "POST",
                "/api/groups",
                Some(serde_json::json!({ "name": "Cloud", "icon": "cloud" })),
                None,
            )
            .await;
        assert_eq!(main.status, StatusCode::CREATED);
        let main_id = main.body["data"]["id"].as_u64().expect("main id");

        let sub = self
            .request(
                "POST",
                &format!("/api/groups/{}/subgroups", main_id),
                Some(serde_json::json!({ "name": "VPS", "config": "[]" })),
                None,
            )
            .await;
        assert_eq!(sub.status, StatusCode::CREATED);
        let sub_id = sub.body["data"]["id"].as_u64().expect("sub id");

        (main_id, sub_id)
    }

    /// Enable reminders with Bark switched on
    pub async fn enable_bark(&self, days_before_expiry: i64) {
        let response = self
            .request(
                "PUT",
                "/api/settings/notifications",
                Some(serde_json::json!({
                    "enabled": true,
                    "daysBeforeExpiry": days_before_expiry,
                    "notificationTime": "09:00",
                    "channels": {
                        "bark": {
                            "enabled": true,
                            "serverUrl": "https://bark.example",
                            "deviceKey": "k"
                        }
                    }
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
