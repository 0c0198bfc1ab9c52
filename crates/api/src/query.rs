//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?limit=` for listings whose page size is clamped in the board layer.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}
