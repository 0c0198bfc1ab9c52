//! Project milestone model and DTOs.

use serde::{Deserialize, Serialize};
use sirn_core::status::MilestoneStatus;
use sirn_core::types::{Date, DbId};
use sqlx::FromRow;

/// A row from the `project_milestones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectMilestone {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub status: MilestoneStatus,
    pub due_date: Option<Date>,
    pub order_index: i32,
    pub completion_pct: i32,
}

/// DTO for creating a milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMilestone {
    pub name: String,
    pub due_date: Option<String>,
    /// Appended after the last milestone if omitted.
    pub order_index: Option<i32>,
}

/// Validated milestone insert.
#[derive(Debug, Clone)]
pub struct NewMilestone {
    pub project_id: DbId,
    pub name: String,
    pub due_date: Option<Date>,
    pub order_index: Option<i32>,
}

/// DTO for updating a milestone. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMilestone {
    pub name: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
    pub order_index: Option<i32>,
    pub completion_pct: Option<i32>,
}

/// Validated milestone patch. `due_date: Some(None)` clears the date.
#[derive(Debug, Clone, Default)]
pub struct MilestonePatch {
    pub name: Option<String>,
    pub status: Option<MilestoneStatus>,
    pub due_date: Option<Option<Date>>,
    pub order_index: Option<i32>,
    pub completion_pct: Option<i32>,
}
