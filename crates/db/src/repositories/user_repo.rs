//! Repository for the `users` table.

use sirn_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{NewUser, User};

const COLUMNS: &str = "id, email, name, role, created_at";

/// Provides insert and lookup operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user. A duplicate email violates `uq_users_email`.
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, name, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(input.role.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by (already normalized) email address.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
