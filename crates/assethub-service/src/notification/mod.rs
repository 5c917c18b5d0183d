//! Expiry reminder cycles.

pub mod guard;
pub mod service;

pub use guard::{CycleGuard, CycleHandle};
pub use service::{
    ChannelTestReport, ChannelTestResult, CheckOptions, CycleDebug, CycleOutcome,
    NotificationService, TestOutcome,
};
