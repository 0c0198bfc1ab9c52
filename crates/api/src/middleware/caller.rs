//! Caller identity extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sirn_core::error::CoreError;
use sirn_core::roles::Caller;
use sirn_core::types::DbId;
use sirn_db::board;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the pre-authenticated user ID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Resolved caller for handlers that attribute audit events.
///
/// ```ignore
/// async fn my_handler(CallerIdentity(caller): CallerIdentity) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %caller.user_id, role = %caller.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity(pub Caller);

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = OptionalCaller::from_request_parts(parts, state)
            .await?
            .0
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {USER_ID_HEADER} header"
                )))
            })?;
        Ok(CallerIdentity(caller))
    }
}

/// Caller for read paths whose output depends on who is asking.
///
/// An absent header yields `None`; a malformed or unknown ID is still
/// rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct OptionalCaller(pub Option<Caller>);

impl FromRequestParts<AppState> for OptionalCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(OptionalCaller(None));
        };

        let user_id = raw
            .to_str()
            .ok()
            .and_then(|v| DbId::parse_str(v.trim()).ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Invalid {USER_ID_HEADER} header. Expected a user UUID"
                )))
            })?;

        match board::resolve_caller(&state.pool, user_id).await {
            Ok(caller) => Ok(OptionalCaller(Some(caller))),
            Err(CoreError::NotFound { .. }) => Err(AppError::Core(CoreError::Unauthorized(
                "Unknown user".into(),
            ))),
            Err(err) => Err(err.into()),
        }
    }
}
