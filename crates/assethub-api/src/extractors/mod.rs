//! Custom request extractors.

pub mod cron;

pub use cron::CronCaller;
