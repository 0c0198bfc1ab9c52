//! Audit event actions.
//!
//! Audit events are append-only; there is no update or delete path.

text_enum! {
    /// Action recorded on an audit event. Matches `ck_audit_events_action`.
    AuditAction("audit action") {
        ApplySlot = "apply_slot",
        AcceptApp = "accept_app",
        RejectApp = "reject_app",
        CreateProject = "create_project",
        UpdateMilestone = "update_milestone",
        AssignStudent = "assign_student",
    }
}

/// Maximum number of audit events returned by a single listing.
pub const MAX_AUDIT_PAGE: i64 = 500;

/// Default number of audit events returned when no limit is given.
pub const DEFAULT_AUDIT_PAGE: i64 = 50;

/// Clamp a caller-supplied page size into `1..=MAX_AUDIT_PAGE`.
pub fn clamp_audit_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_AUDIT_PAGE).clamp(1, MAX_AUDIT_PAGE)
}
