//! Repository for the `slot_applications` table.

use sirn_core::status::ApplicationStatus;
use sirn_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::slot::{NewApplication, SlotApplication};

const COLUMNS: &str = "\
    id, slot_id, student_id, status, note, cv_url_snapshot, \
    submitted_at, decided_at, decided_by_user_id";

/// Provides submission and decision operations for slot applications.
pub struct SlotApplicationRepo;

impl SlotApplicationRepo {
    /// Insert a `submitted` application. A second pending application from
    /// the same student violates `uq_slot_applications_pending_student`.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &NewApplication,
    ) -> Result<SlotApplication, sqlx::Error> {
        let query = format!(
            "INSERT INTO slot_applications (slot_id, student_id, note, cv_url_snapshot)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlotApplication>(&query)
            .bind(input.slot_id)
            .bind(input.student_id)
            .bind(&input.note)
            .bind(&input.cv_url_snapshot)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<SlotApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slot_applications WHERE id = $1");
        sqlx::query_as::<_, SlotApplication>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find an application and lock its row for the rest of the transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<SlotApplication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM slot_applications WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, SlotApplication>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List a slot's applications, oldest first.
    pub async fn list_by_slot(
        pool: &PgPool,
        slot_id: DbId,
    ) -> Result<Vec<SlotApplication>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slot_applications WHERE slot_id = $1 ORDER BY submitted_at ASC"
        );
        sqlx::query_as::<_, SlotApplication>(&query)
            .bind(slot_id)
            .fetch_all(pool)
            .await
    }

    /// Record a decision on a still-`submitted` application.
    ///
    /// Returns `None` if the application does not exist or was already
    /// decided or withdrawn.
    pub async fn decide<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        status: ApplicationStatus,
        decided_by_user_id: DbId,
    ) -> Result<Option<SlotApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE slot_applications
             SET status = $2, decided_at = NOW(), decided_by_user_id = $3
             WHERE id = $1 AND status = 'submitted'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlotApplication>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(decided_by_user_id)
            .fetch_optional(executor)
            .await
    }

    /// Reject every pending application for a slot except `accepted_id`.
    /// Returns the number of applications rejected.
    pub async fn reject_competitors<'e>(
        executor: impl PgExecutor<'e>,
        slot_id: DbId,
        accepted_id: DbId,
        decided_by_user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE slot_applications
             SET status = 'rejected', decided_at = NOW(), decided_by_user_id = $3
             WHERE slot_id = $1 AND id <> $2 AND status = 'submitted'",
        )
        .bind(slot_id)
        .bind(accepted_id)
        .bind(decided_by_user_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Withdraw a still-`submitted` application. Withdrawal is not a
    /// decision, so the decision columns stay empty.
    pub async fn withdraw(pool: &PgPool, id: DbId) -> Result<Option<SlotApplication>, sqlx::Error> {
        let query = format!(
            "UPDATE slot_applications SET status = 'withdrawn'
             WHERE id = $1 AND status = 'submitted'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlotApplication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
