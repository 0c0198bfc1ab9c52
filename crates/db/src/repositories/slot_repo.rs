//! Repository for the `project_slots` table.

use sirn_core::status::SlotStatus;
use sirn_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::slot::{CreateSlot, ProjectSlot};

const COLUMNS: &str = "id, project_id, role_name, est_hours, status, description";

/// Provides CRUD and status transitions for project slots.
pub struct ProjectSlotRepo;

impl ProjectSlotRepo {
    /// Insert an `open` slot. `input` must already be trimmed and validated.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateSlot,
    ) -> Result<ProjectSlot, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_slots (project_id, role_name, est_hours, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectSlot>(&query)
            .bind(project_id)
            .bind(&input.role_name)
            .bind(input.est_hours)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_slots WHERE id = $1");
        sqlx::query_as::<_, ProjectSlot>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a slot and take a row lock on it for the rest of the transaction.
    ///
    /// Every mutation that depends on a slot's status locks the slot first,
    /// which serializes concurrent decisions on the same slot.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<ProjectSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_slots WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ProjectSlot>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List all slots of a project. No ordering is guaranteed.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectSlot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_slots WHERE project_id = $1");
        sqlx::query_as::<_, ProjectSlot>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn set_status<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        status: SlotStatus,
    ) -> Result<Option<ProjectSlot>, sqlx::Error> {
        let query = format!("UPDATE project_slots SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, ProjectSlot>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(executor)
            .await
    }
}
