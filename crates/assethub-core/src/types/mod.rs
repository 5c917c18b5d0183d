//! Core type definitions used across the AssetHub workspace.

pub mod id;

pub use id::*;
