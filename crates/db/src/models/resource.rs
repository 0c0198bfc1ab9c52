//! Project resource model and DTOs.

use serde::{Deserialize, Serialize};
use sirn_core::status::ResourceType;
use sirn_core::types::DbId;
use sqlx::FromRow;

/// A row from the `project_resources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectResource {
    pub id: DbId,
    pub project_id: DbId,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub url: String,
    pub label: Option<String>,
}

/// DTO for attaching a resource link to a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub url: String,
    pub label: Option<String>,
}

/// Validated resource insert.
#[derive(Debug, Clone)]
pub struct NewResource {
    pub project_id: DbId,
    pub resource_type: ResourceType,
    pub url: String,
    pub label: Option<String>,
}
