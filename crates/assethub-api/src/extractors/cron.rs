//! `CronCaller` extractor: checks the bearer secret on the cron trigger.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use assethub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// A caller allowed to fire the cron trigger.
///
/// When `notification.cron_secret` is unset or empty every caller is
/// accepted; otherwise the request must carry `Authorization: Bearer <secret>`.
#[derive(Debug, Clone, Copy)]
pub struct CronCaller;

impl FromRequestParts<AppState> for CronCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(secret) = state
            .config
            .notification
            .cron_secret
            .as_deref()
            .filter(|s| !s.is_empty())
        else {
            return Ok(CronCaller);
        };

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::authentication("Missing or malformed Authorization header"))?;

        if bearer.token() != secret {
            tracing::warn!("Cron trigger rejected: invalid secret");
            return Err(AppError::authentication("Invalid cron secret").into());
        }

        Ok(CronCaller)
    }
}
