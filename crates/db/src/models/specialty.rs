//! Specialty (board) entity model and DTOs.

use serde::{Deserialize, Serialize};
use sirn_core::types::DbId;
use sqlx::FromRow;

/// A row from the `specialties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Specialty {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub display_order: i32,
    pub is_active: bool,
}

/// DTO for creating a specialty.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpecialty {
    pub name: String,
    pub slug: String,
    /// Defaults to 0 if omitted.
    pub display_order: Option<i32>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// An active specialty with its active-project and open-slot counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpecialtyWithCounts {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub specialty: Specialty,
    /// Projects in this specialty with `status = 'active'`.
    pub project_count: i64,
    /// Open slots across this specialty's active projects only.
    pub open_slot_count: i64,
}
