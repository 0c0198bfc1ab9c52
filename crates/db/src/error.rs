//! Mapping of store failures onto [`CoreError`].

use sirn_core::error::CoreError;

/// PostgreSQL SQLSTATE codes the board distinguishes.
mod sqlstate {
    pub const UNIQUE_VIOLATION: &str = "23505";
    pub const FOREIGN_KEY_VIOLATION: &str = "23503";
    pub const CHECK_VIOLATION: &str = "23514";
    pub const NOT_NULL_VIOLATION: &str = "23502";
    pub const INVALID_TEXT_REPRESENTATION: &str = "22P02";
    pub const INVALID_DATETIME_FORMAT: &str = "22007";
    pub const SERIALIZATION_FAILURE: &str = "40001";
    pub const DEADLOCK_DETECTED: &str = "40P01";
    /// Class 08: connection exceptions.
    pub const CONNECTION_EXCEPTION_CLASS: &str = "08";
}

/// Classify a sqlx error into a typed [`CoreError`].
///
/// - Unique violations and lost concurrent races map to `Conflict`.
/// - Foreign-key, check, not-null and malformed-value errors map to `Validation`.
/// - Pool exhaustion, closed pools and transport failures map to `StoreUnavailable`.
/// - Everything else maps to `Internal`.
pub fn classify_store_error(err: sqlx::Error) -> CoreError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some(sqlstate::UNIQUE_VIOLATION) => CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                )),
                Some(sqlstate::SERIALIZATION_FAILURE | sqlstate::DEADLOCK_DETECTED) => {
                    CoreError::Conflict("Concurrent update conflict, retry the operation".into())
                }
                Some(sqlstate::FOREIGN_KEY_VIOLATION) => CoreError::Validation(format!(
                    "Referenced row does not exist: {constraint}"
                )),
                Some(sqlstate::CHECK_VIOLATION) => CoreError::Validation(format!(
                    "Value violates check constraint: {constraint}"
                )),
                Some(
                    sqlstate::NOT_NULL_VIOLATION
                    | sqlstate::INVALID_TEXT_REPRESENTATION
                    | sqlstate::INVALID_DATETIME_FORMAT,
                ) => CoreError::Validation(db_err.message().to_string()),
                Some(code) if code.starts_with(sqlstate::CONNECTION_EXCEPTION_CLASS) => {
                    CoreError::StoreUnavailable(db_err.message().to_string())
                }
                _ => {
                    tracing::error!(error = %db_err, "Unclassified database error");
                    CoreError::Internal(db_err.message().to_string())
                }
            }
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_) => CoreError::StoreUnavailable(err.to_string()),
        _ => {
            tracing::error!(error = %err, "Unexpected store error");
            CoreError::Internal(err.to_string())
        }
    }
}
