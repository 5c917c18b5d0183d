//! Asset domain entities.

pub mod model;

pub use model::Asset;
