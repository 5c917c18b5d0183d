//! # assethub-notify
//!
//! Expiry reminders for AssetHub:
//!
//! - [`extractor`] finds due dates on an asset
//! - [`calendar`] evaluates them in the business calendar
//! - [`evaluator`] decides what to send and maintains the daily ledger
//! - [`channel`] pushes messages to Bark and Telegram

pub mod calendar;
pub mod channel;
pub mod evaluator;
pub mod extractor;
pub mod message;

pub use calendar::{BusinessCalendar, TriggerTime, TriggerWindow};
pub use channel::{ChannelBuilder, ChannelFactory, ChannelSet, DeliveryResults, NotificationChannel};
pub use evaluator::{Evaluator, NotificationResult, Plan, WindowStatus};
pub use extractor::NotificationItem;
pub use message::NotificationMessage;
