//! Repositories over the JSON document.
//!
//! Each repository holds a shared [`JsonStore`](crate::JsonStore) and
//! performs one read-modify-write per mutating call.

pub mod asset;
pub mod group;
pub mod settings;

pub use asset::AssetRepository;
pub use group::GroupRepository;
pub use settings::SettingsRepository;
