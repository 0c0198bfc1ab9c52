//! Repository for the append-only `audit_events` table.

use sirn_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::audit::{AuditEvent, NewAuditEvent};

const COLUMNS: &str = "id, user_id, action, context, created_at";

/// Insert and query audit events. There is deliberately no update or delete.
pub struct AuditEventRepo;

impl AuditEventRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &NewAuditEvent,
    ) -> Result<AuditEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_events (user_id, action, context)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditEvent>(&query)
            .bind(input.user_id)
            .bind(input.action.as_str())
            .bind(&input.context)
            .fetch_one(executor)
            .await
    }

    /// List a user's audit events, newest first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<AuditEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM audit_events
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, AuditEvent>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
