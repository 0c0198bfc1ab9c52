//! Repository for the `project_resources` table.

use sirn_core::types::DbId;
use sqlx::PgPool;

use crate::models::resource::{NewResource, ProjectResource};

const COLUMNS: &str = "id, project_id, type, url, label";

pub struct ProjectResourceRepo;

impl ProjectResourceRepo {
    pub async fn create(pool: &PgPool, input: &NewResource) -> Result<ProjectResource, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_resources (project_id, type, url, label)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectResource>(&query)
            .bind(input.project_id)
            .bind(input.resource_type.as_str())
            .bind(&input.url)
            .bind(&input.label)
            .fetch_one(pool)
            .await
    }

    /// List a project's resources. No ordering is guaranteed.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectResource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_resources WHERE project_id = $1");
        sqlx::query_as::<_, ProjectResource>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
