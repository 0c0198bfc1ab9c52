//! Audit event recording and listing.

use serde_json::Value;
use sirn_core::audit::{clamp_audit_limit, AuditAction};
use sirn_core::error::CoreError;
use sirn_core::roles::Caller;
use sirn_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::error::classify_store_error;
use crate::models::audit::{AuditEvent, NewAuditEvent};
use crate::repositories::{AuditEventRepo, UserRepo};

/// Append an audit event attributed to `caller`.
///
/// Pass the open transaction so the event commits or rolls back with the
/// change it describes.
pub(crate) async fn record<'e>(
    executor: impl PgExecutor<'e>,
    caller: &Caller,
    action: AuditAction,
    context: Value,
) -> Result<AuditEvent, CoreError> {
    let input = NewAuditEvent {
        user_id: caller.user_id,
        action,
        context: Some(context.to_string()),
    };
    AuditEventRepo::create(executor, &input)
        .await
        .map_err(classify_store_error)
}

/// List a user's audit events, newest first.
pub async fn list_audit_events(
    pool: &PgPool,
    user_id: DbId,
    limit: Option<i64>,
) -> Result<Vec<AuditEvent>, CoreError> {
    UserRepo::find_by_id(pool, user_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("User", user_id))?;

    AuditEventRepo::list_by_user(pool, user_id, clamp_audit_limit(limit))
        .await
        .map_err(classify_store_error)
}
