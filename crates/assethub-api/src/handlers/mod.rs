//! Route handlers organized by domain.

pub mod asset;
pub mod cron;
pub mod dashboard;
pub mod group;
pub mod health;
pub mod notification;
pub mod settings;
