//! Repository for the `project_milestones` table.

use sirn_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::milestone::{MilestonePatch, NewMilestone, ProjectMilestone};

const COLUMNS: &str = "id, project_id, name, status, due_date, order_index, completion_pct";

/// Provides CRUD operations for project milestones.
pub struct ProjectMilestoneRepo;

impl ProjectMilestoneRepo {
    /// Insert a `todo` milestone. Without an explicit `order_index` the
    /// milestone is appended after the project's current last one.
    pub async fn create(
        pool: &PgPool,
        input: &NewMilestone,
    ) -> Result<ProjectMilestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_milestones (project_id, name, due_date, order_index)
             VALUES ($1, $2, $3, COALESCE($4, (
                 SELECT COALESCE(MAX(order_index) + 1, 0)
                 FROM project_milestones WHERE project_id = $1
             )))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMilestone>(&query)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(input.due_date)
            .bind(input.order_index)
            .fetch_one(pool)
            .await
    }

    /// List a project's milestones ascending by `order_index`.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectMilestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_milestones
             WHERE project_id = $1
             ORDER BY order_index ASC, name ASC"
        );
        sqlx::query_as::<_, ProjectMilestone>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a validated patch. Returns `None` if the milestone does not exist.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        patch: &MilestonePatch,
    ) -> Result<Option<ProjectMilestone>, sqlx::Error> {
        let query = format!(
            "UPDATE project_milestones SET
                name = COALESCE($2, name),
                status = COALESCE($3, status),
                due_date = CASE WHEN $4 THEN $5 ELSE due_date END,
                order_index = COALESCE($6, order_index),
                completion_pct = COALESCE($7, completion_pct)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectMilestone>(&query)
            .bind(id)
            .bind(&patch.name)
            .bind(patch.status.map(|s| s.as_str()))
            .bind(patch.due_date.is_some())
            .bind(patch.due_date.flatten())
            .bind(patch.order_index)
            .bind(patch.completion_pct)
            .fetch_optional(executor)
            .await
    }
}
