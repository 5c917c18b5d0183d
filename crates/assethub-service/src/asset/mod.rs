//! Asset management.

pub mod service;

pub use service::{AssetListing, AssetService, CreateAssetRequest, DueItem, UpdateAssetRequest};
