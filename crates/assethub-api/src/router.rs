//! Route definitions for the AssetHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes and the request-logging middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(dashboard_routes())
        .merge(asset_routes())
        .merge(group_routes())
        .merge(settings_routes())
        .merge(notification_routes())
        .merge(cron_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Dashboard counters
fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(handlers::dashboard::stats))
}

/// Asset CRUD, copy and due items
fn asset_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/assets",
            get(handlers::asset::list_assets).post(handlers::asset::create_asset),
        )
        .route(
            "/assets/{id}",
            get(handlers::asset::get_asset)
                .put(handlers::asset::update_asset)
                .delete(handlers::asset::delete_asset),
        )
        .route("/assets/{id}/copy", post(handlers::asset::copy_asset))
        .route("/assets/{id}/items", get(handlers::asset::due_items))
}

/// Main groups and their sub groups
fn group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            get(handlers::group::list_groups).post(handlers::group::create_group),
        )
        .route(
            "/groups/{id}",
            put(handlers::group::update_group).delete(handlers::group::delete_group),
        )
        .route("/groups/{id}/copy", post(handlers::group::copy_group))
        .route(
            "/groups/{id}/subgroups",
            post(handlers::group::create_sub_group),
        )
        .route(
            "/subgroups/{id}",
            put(handlers::group::update_sub_group).delete(handlers::group::delete_sub_group),
        )
        .route("/subgroups/{id}/copy", post(handlers::group::copy_sub_group))
}

/// Notification preferences
fn settings_routes() -> Router<AppState> {
    Router::new().route(
        "/settings/notifications",
        get(handlers::settings::get_settings).put(handlers::settings::update_settings),
    )
}

/// Manual cycles, channel test and ledger reset
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications/check", post(handlers::notification::check))
        .route("/notifications/test", post(handlers::notification::test))
        .route("/notifications/ledger", delete(handlers::notification::clear_ledger))
}

/// External scheduler entrypoint
fn cron_routes() -> Router<AppState> {
    Router::new().route("/cron", get(handlers::cron::trigger))
}
