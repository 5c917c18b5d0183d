//! Background reminder cycles for AssetHub.
//!
//! This crate provides:
//! - A cycle runner that executes one guarded evaluation and absorbs failures
//! - A cron scheduler that fires the runner once a minute

pub mod runner;
pub mod scheduler;

pub use runner::CycleRunner;
pub use scheduler::NotificationScheduler;
