//! Audit event model and DTOs.
//!
//! Audit events have no update DTO: rows are immutable once written.

use serde::Serialize;
use sirn_core::audit::AuditAction;
use sirn_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `audit_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuditEvent {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(try_from = "String")]
    pub action: AuditAction,
    pub context: Option<String>,
    pub created_at: Timestamp,
}

/// Audit event insert. `context` is a compact JSON string.
#[derive(Debug, Clone)]
pub struct NewAuditEvent {
    pub user_id: DbId,
    pub action: AuditAction,
    pub context: Option<String>,
}
