//! # assethub-entity
//!
//! Domain entity models for AssetHub. Every struct in this crate is part of
//! the single JSON document persisted on disk, or a value derived from it.
//! Field names serialize in camelCase to stay compatible with existing
//! `db.json` files.

pub mod asset;
pub mod document;
pub mod group;
pub mod notification;

pub use asset::Asset;
pub use document::{Document, NextIds};
pub use group::{MainGroup, SubGroup};
pub use notification::{ChannelKind, LedgerDelta, NotificationSettings, NotifiedRecord};
