//! Repository for the `projects` table.

use sirn_core::status::ProjectStatus;
use sirn_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::project::{NewProject, Project, ProjectPatch, ProjectWithSlotStats};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, specialty_id, title, description, deliverables, irb_status, irb_number, \
    start_date, target_date, progress_pct, status, created_at";

/// Same columns qualified with the `p` alias for joined queries.
const PREFIXED_COLUMNS: &str = "\
    p.id, p.specialty_id, p.title, p.description, p.deliverables, p.irb_status, \
    p.irb_number, p.start_date, p.target_date, p.progress_pct, p.status, p.created_at";

/// Provides CRUD operations and slot statistics for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a validated project, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &NewProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (specialty_id, title, description, deliverables, irb_status,
                 irb_number, start_date, target_date, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.specialty_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.deliverables)
            .bind(input.irb_status.as_str())
            .bind(&input.irb_number)
            .bind(input.start_date)
            .bind(input.target_date)
            .bind(input.status.as_str())
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a specialty's active projects with total and open slot counts,
    /// newest first, in one grouped query.
    pub async fn list_active_with_slot_stats(
        pool: &PgPool,
        specialty_id: DbId,
    ) -> Result<Vec<ProjectWithSlotStats>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS},
                    COUNT(ps.id) AS total_slots,
                    COUNT(ps.id) FILTER (WHERE ps.status = 'open') AS open_slots
             FROM projects p
             LEFT JOIN project_slots ps ON ps.project_id = p.id
             WHERE p.specialty_id = $1 AND p.status = 'active'
             GROUP BY p.id
             ORDER BY p.created_at DESC, p.title ASC"
        );
        sqlx::query_as::<_, ProjectWithSlotStats>(&query)
            .bind(specialty_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a validated patch. Only supplied fields change; `specialty_id`,
    /// `status` and `created_at` are never touched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &ProjectPatch,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                title = COALESCE($2, title),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                deliverables = COALESCE($5, deliverables),
                irb_status = COALESCE($6, irb_status),
                irb_number = CASE WHEN $7 THEN $8 ELSE irb_number END,
                start_date = CASE WHEN $9 THEN $10 ELSE start_date END,
                target_date = CASE WHEN $11 THEN $12 ELSE target_date END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&patch.title)
            .bind(patch.description.is_some())
            .bind(patch.description.clone().flatten())
            .bind(&patch.deliverables)
            .bind(patch.irb_status.map(|s| s.as_str()))
            .bind(patch.irb_number.is_some())
            .bind(patch.irb_number.clone().flatten())
            .bind(patch.start_date.is_some())
            .bind(patch.start_date.flatten())
            .bind(patch.target_date.is_some())
            .bind(patch.target_date.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Set the lifecycle status. Returns `None` if the project does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ProjectStatus,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("UPDATE projects SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Set the progress percentage. Returns `None` if the project does not exist.
    pub async fn set_progress(
        pool: &PgPool,
        id: DbId,
        progress_pct: i32,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query =
            format!("UPDATE projects SET progress_pct = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(progress_pct)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a project. Slots, applications, assignments,
    /// owners, milestones and resources cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
