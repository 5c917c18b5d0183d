//! Notification settings management.

pub mod service;

pub use service::SettingsService;
