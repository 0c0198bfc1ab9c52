//! Repository for the `specialties` table.

use sirn_core::types::DbId;
use sqlx::PgPool;

use crate::models::specialty::{CreateSpecialty, Specialty, SpecialtyWithCounts};

const COLUMNS: &str = "id, name, slug, display_order, is_active";

/// Provides CRUD and aggregate listing for specialties.
pub struct SpecialtyRepo;

impl SpecialtyRepo {
    /// Insert a specialty. `display_order` defaults to 0, `is_active` to true.
    pub async fn create(pool: &PgPool, input: &CreateSpecialty) -> Result<Specialty, sqlx::Error> {
        let query = format!(
            "INSERT INTO specialties (name, slug, display_order, is_active)
             VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Specialty>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.display_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Specialty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM specialties WHERE id = $1");
        sqlx::query_as::<_, Specialty>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a specialty by its routing slug, active or not.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Specialty>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM specialties WHERE slug = $1");
        sqlx::query_as::<_, Specialty>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List active specialties with their active-project and open-slot
    /// counts in one grouped query, ordered by `display_order`.
    ///
    /// Slots are only joined through active projects, so a specialty with no
    /// active projects reports zero for both counts.
    pub async fn list_active_with_counts(
        pool: &PgPool,
    ) -> Result<Vec<SpecialtyWithCounts>, sqlx::Error> {
        sqlx::query_as::<_, SpecialtyWithCounts>(
            "SELECT s.id, s.name, s.slug, s.display_order, s.is_active,
                    COUNT(DISTINCT p.id) AS project_count,
                    COUNT(ps.id) FILTER (WHERE ps.status = 'open') AS open_slot_count
             FROM specialties s
             LEFT JOIN projects p ON p.specialty_id = s.id AND p.status = 'active'
             LEFT JOIN project_slots ps ON ps.project_id = p.id
             WHERE s.is_active
             GROUP BY s.id
             ORDER BY s.display_order ASC, s.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Permanently delete a specialty. Projects and all their children cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM specialties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
