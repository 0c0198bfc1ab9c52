//! Slot, application and assignment models and DTOs.

use serde::{Deserialize, Serialize};
use sirn_core::status::{ApplicationStatus, SlotStatus};
use sirn_core::types::{DbId, Timestamp};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// A row from the `project_slots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectSlot {
    pub id: DbId,
    pub project_id: DbId,
    pub role_name: String,
    pub est_hours: i32,
    #[sqlx(try_from = "String")]
    pub status: SlotStatus,
    pub description: Option<String>,
}

/// DTO for creating a slot. New slots are always `open`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSlot {
    pub role_name: String,
    pub est_hours: i32,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// A row from the `slot_applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SlotApplication {
    pub id: DbId,
    pub slot_id: DbId,
    pub student_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: ApplicationStatus,
    pub note: Option<String>,
    pub cv_url_snapshot: Option<String>,
    pub submitted_at: Timestamp,
    pub decided_at: Option<Timestamp>,
    pub decided_by_user_id: Option<DbId>,
}

/// DTO for applying to a slot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApplication {
    pub student_id: DbId,
    pub note: Option<String>,
}

/// Validated application insert.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub slot_id: DbId,
    pub student_id: DbId,
    pub note: Option<String>,
    pub cv_url_snapshot: Option<String>,
}

/// Optional note attached when accepting an application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcceptApplication {
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

/// A row from the `slot_assignments` table. At most one per slot.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SlotAssignment {
    pub id: DbId,
    pub slot_id: DbId,
    pub student_id: DbId,
    pub assigned_at: Timestamp,
    pub note: Option<String>,
}

/// Assignment insert.
#[derive(Debug, Clone)]
pub struct NewSlotAssignment {
    pub slot_id: DbId,
    pub student_id: DbId,
    pub note: Option<String>,
}

/// Outcome of accepting an application.
#[derive(Debug, Clone, Serialize)]
pub struct AcceptedApplication {
    pub application: SlotApplication,
    pub assignment: SlotAssignment,
    /// Competing pending applications marked `rejected` in the same transaction.
    pub rejected_competitors: u64,
}
