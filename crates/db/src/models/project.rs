//! Project entity model, DTOs and derived views.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sirn_core::normalize::ListInput;
use sirn_core::roles::ResearcherPosition;
use sirn_core::status::{IrbStatus, ProjectStatus, SlotStatus};
use sirn_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;

use crate::models::milestone::ProjectMilestone;
use crate::models::resource::ProjectResource;
use crate::models::slot::{ProjectSlot, SlotAssignment};

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub specialty_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub deliverables: Vec<String>,
    #[sqlx(try_from = "String")]
    pub irb_status: IrbStatus,
    pub irb_number: Option<String>,
    pub start_date: Option<Date>,
    pub target_date: Option<Date>,
    pub progress_pct: i32,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub created_at: Timestamp,
}

/// DTO for creating a project, as submitted by the caller.
///
/// Blank optional fields are stored as `NULL`. `deliverables` accepts a
/// comma-separated string or an array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: Option<String>,
    pub deliverables: Option<ListInput>,
    /// Defaults to `pending` if omitted.
    pub irb_status: Option<String>,
    pub irb_number: Option<String>,
    pub start_date: Option<String>,
    pub target_date: Option<String>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
}

/// Validated project insert.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub specialty_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub deliverables: Vec<String>,
    pub irb_status: IrbStatus,
    pub irb_number: Option<String>,
    pub start_date: Option<Date>,
    pub target_date: Option<Date>,
    pub status: ProjectStatus,
}

/// DTO for updating a project. Omitted fields keep their stored value; a
/// blank string clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deliverables: Option<ListInput>,
    pub irb_status: Option<String>,
    pub irb_number: Option<String>,
    pub start_date: Option<String>,
    pub target_date: Option<String>,
}

/// Validated project patch.
///
/// The outer `Option` means "supplied"; the inner one is the new nullable
/// value.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub deliverables: Option<Vec<String>>,
    pub irb_status: Option<IrbStatus>,
    pub irb_number: Option<Option<String>>,
    pub start_date: Option<Option<Date>>,
    pub target_date: Option<Option<Date>>,
}

/// An active project with its slot counts. `open_slots <= total_slots`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectWithSlotStats {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub total_slots: i64,
    pub open_slots: i64,
}

// ---------------------------------------------------------------------------
// Owners
// ---------------------------------------------------------------------------

/// A row from the `project_owners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectOwner {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    #[sqlx(try_from = "String")]
    pub owner_position: ResearcherPosition,
}

/// DTO for adding an owner to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectOwner {
    pub user_id: DbId,
    pub owner_position: String,
}

// ---------------------------------------------------------------------------
// Detail view
// ---------------------------------------------------------------------------

/// Everything needed to render one project.
#[derive(Debug, Clone)]
pub struct ProjectDetail {
    pub project: Project,
    /// No defined order.
    pub slots: Vec<ProjectSlot>,
    /// Ascending by `order_index`.
    pub milestones: Vec<ProjectMilestone>,
    /// No defined order.
    pub resources: Vec<ProjectResource>,
    pub assignments_by_slot: HashMap<DbId, SlotAssignment>,
}

/// A slot as exposed to readers.
///
/// Assignee identity is only present when the reader is allowed to see it.
#[derive(Debug, Clone, Serialize)]
pub struct SlotView {
    pub id: DbId,
    pub role_name: String,
    pub est_hours: i32,
    pub status: SlotStatus,
    pub description: Option<String>,
    pub has_assignment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_student_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_at: Option<Timestamp>,
}

/// Serializable form of [`ProjectDetail`].
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetailView {
    pub project: Project,
    pub slots: Vec<SlotView>,
    pub milestones: Vec<ProjectMilestone>,
    pub resources: Vec<ProjectResource>,
}

impl ProjectDetail {
    pub fn has_assignment(&self, slot_id: DbId) -> bool {
        self.assignments_by_slot.contains_key(&slot_id)
    }

    /// Render slots, revealing assignees only when `reveal_assignees` is set.
    pub fn slot_views(&self, reveal_assignees: bool) -> Vec<SlotView> {
        self.slots
            .iter()
            .map(|slot| {
                let assignment = self
                    .assignments_by_slot
                    .get(&slot.id)
                    .filter(|_| reveal_assignees);
                SlotView {
                    id: slot.id,
                    role_name: slot.role_name.clone(),
                    est_hours: slot.est_hours,
                    status: slot.status,
                    description: slot.description.clone(),
                    has_assignment: self.has_assignment(slot.id),
                    assignee_student_id: assignment.map(|a| a.student_id),
                    assigned_at: assignment.map(|a| a.assigned_at),
                }
            })
            .collect()
    }

    pub fn into_view(self, reveal_assignees: bool) -> ProjectDetailView {
        let slots = self.slot_views(reveal_assignees);
        ProjectDetailView {
            project: self.project,
            slots,
            milestones: self.milestones,
            resources: self.resources,
        }
    }
}
