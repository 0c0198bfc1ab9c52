//! Repository for the `project_owners` link table.

use sirn_core::roles::ResearcherPosition;
use sirn_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::ProjectOwner;

const COLUMNS: &str = "id, project_id, user_id, owner_position";

/// Provides owner linking for projects (many-to-many with users).
pub struct ProjectOwnerRepo;

impl ProjectOwnerRepo {
    /// Link a user as an owner. Linking the same user twice violates
    /// `uq_project_owners_project_user`.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        owner_position: ResearcherPosition,
    ) -> Result<ProjectOwner, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_owners (project_id, user_id, owner_position)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectOwner>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(owner_position.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectOwner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_owners WHERE project_id = $1");
        sqlx::query_as::<_, ProjectOwner>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn is_owner(pool: &PgPool, project_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM project_owners WHERE project_id = $1 AND user_id = $2)",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
