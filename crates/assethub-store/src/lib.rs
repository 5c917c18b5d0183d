//! # assethub-store
//!
//! Persistence for AssetHub: a single JSON document on disk, read fully and
//! replaced wholesale on every mutation, plus thin repositories over it.

pub mod document;
pub mod repositories;

pub use document::JsonStore;
