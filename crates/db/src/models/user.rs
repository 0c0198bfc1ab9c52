//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sirn_core::roles::UserRole;
use sirn_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    pub created_at: Timestamp,
}

/// DTO for creating a user. `role` is validated against [`UserRole`].
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Validated user insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}
