//! # assethub-api
//!
//! HTTP API layer for AssetHub built on Axum.
//!
//! Provides the REST endpoints for assets, groups, settings and reminder
//! cycles, the cron trigger, middleware (CORS, compression, logging),
//! DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
