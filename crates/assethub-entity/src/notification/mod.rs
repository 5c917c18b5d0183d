//! Notification settings and de-duplication ledger entities.

pub mod channel;
pub mod settings;

pub use channel::{BarkSettings, ChannelKind, ChannelSettings, TelegramSettings};
pub use settings::{LedgerDelta, NotificationSettings, NotifiedRecord};
