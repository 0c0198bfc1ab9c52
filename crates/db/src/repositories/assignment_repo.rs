//! Repository for the `slot_assignments` table.

use sirn_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::slot::{NewSlotAssignment, SlotAssignment};

const COLUMNS: &str = "id, slot_id, student_id, assigned_at, note";

/// Provides insert and batch lookup for slot assignments.
pub struct SlotAssignmentRepo;

impl SlotAssignmentRepo {
    /// Insert an assignment. A second assignment for the same slot violates
    /// `uq_slot_assignments_slot_id`; that constraint is the only guard
    /// against double assignment.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &NewSlotAssignment,
    ) -> Result<SlotAssignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO slot_assignments (slot_id, student_id, note)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlotAssignment>(&query)
            .bind(input.slot_id)
            .bind(input.student_id)
            .bind(&input.note)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_slot(
        pool: &PgPool,
        slot_id: DbId,
    ) -> Result<Option<SlotAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slot_assignments WHERE slot_id = $1");
        sqlx::query_as::<_, SlotAssignment>(&query)
            .bind(slot_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the assignments for a set of slots in one query.
    pub async fn list_by_slot_ids(
        pool: &PgPool,
        slot_ids: &[DbId],
    ) -> Result<Vec<SlotAssignment>, sqlx::Error> {
        if slot_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM slot_assignments WHERE slot_id = ANY($1)");
        sqlx::query_as::<_, SlotAssignment>(&query)
            .bind(slot_ids)
            .fetch_all(pool)
            .await
    }
}
