//! Category (main group / sub group) entities.

pub mod model;

pub use model::{MainGroup, SubGroup};
