//! Milestones and resource links.

use serde_json::json;
use sirn_core::audit::AuditAction;
use sirn_core::error::CoreError;
use sirn_core::normalize::{
    blank_to_none, parse_optional_date, require_text, validate_percent, validate_url,
};
use sirn_core::roles::Caller;
use sirn_core::status::{MilestoneStatus, ResourceType};
use sirn_core::types::DbId;
use sqlx::PgPool;

use crate::board::audit;
use crate::board::projects::ensure_project_exists;
use crate::error::classify_store_error;
use crate::models::milestone::{
    CreateMilestone, MilestonePatch, NewMilestone, ProjectMilestone, UpdateMilestone,
};
use crate::models::resource::{CreateResource, NewResource, ProjectResource};
use crate::repositories::{ProjectMilestoneRepo, ProjectResourceRepo};

/// Add a milestone to a project. Without an explicit `order_index` it is
/// placed after the current last milestone.
pub async fn create_milestone(
    pool: &PgPool,
    project_id: DbId,
    input: &CreateMilestone,
) -> Result<ProjectMilestone, CoreError> {
    let new = NewMilestone {
        project_id,
        name: require_text("name", &input.name)?,
        due_date: parse_optional_date("due_date", input.due_date.as_deref())?,
        order_index: input.order_index,
    };
    ensure_project_exists(pool, project_id).await?;

    let milestone = ProjectMilestoneRepo::create(pool, &new)
        .await
        .map_err(classify_store_error)?;

    tracing::info!(
        milestone_id = %milestone.id,
        project_id = %project_id,
        order_index = milestone.order_index,
        "Milestone created"
    );
    Ok(milestone)
}

/// Partially update a milestone and record an `update_milestone` event.
///
/// Marking a milestone `done` sets its completion to 100 regardless of any
/// supplied percentage.
pub async fn update_milestone(
    pool: &PgPool,
    caller: &Caller,
    milestone_id: DbId,
    input: &UpdateMilestone,
) -> Result<ProjectMilestone, CoreError> {
    let patch = normalize_milestone_patch(input)?;

    let mut tx = pool.begin().await.map_err(classify_store_error)?;

    let milestone = ProjectMilestoneRepo::update(&mut *tx, milestone_id, &patch)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Milestone", milestone_id))?;

    audit::record(
        &mut *tx,
        caller,
        AuditAction::UpdateMilestone,
        json!({
            "milestone_id": milestone.id,
            "project_id": milestone.project_id,
            "status": milestone.status,
            "completion_pct": milestone.completion_pct,
        }),
    )
    .await?;

    tx.commit().await.map_err(classify_store_error)?;

    tracing::info!(
        milestone_id = %milestone_id,
        status = %milestone.status,
        completion_pct = milestone.completion_pct,
        "Milestone updated"
    );
    Ok(milestone)
}

/// Attach a resource link to a project.
pub async fn add_resource(
    pool: &PgPool,
    project_id: DbId,
    input: &CreateResource,
) -> Result<ProjectResource, CoreError> {
    let new = NewResource {
        project_id,
        resource_type: input.resource_type.trim().parse::<ResourceType>()?,
        url: validate_url(&input.url)?,
        label: blank_to_none(input.label.as_deref()),
    };
    ensure_project_exists(pool, project_id).await?;

    let resource = ProjectResourceRepo::create(pool, &new)
        .await
        .map_err(classify_store_error)?;

    tracing::info!(
        resource_id = %resource.id,
        project_id = %project_id,
        resource_type = %resource.resource_type,
        "Resource added"
    );
    Ok(resource)
}

fn normalize_milestone_patch(input: &UpdateMilestone) -> Result<MilestonePatch, CoreError> {
    let status = blank_to_none(input.status.as_deref())
        .map(|s| s.parse::<MilestoneStatus>())
        .transpose()?;
    let completion_pct = input
        .completion_pct
        .map(|pct| validate_percent("completion_pct", pct))
        .transpose()?;

    Ok(MilestonePatch {
        name: input
            .name
            .as_deref()
            .map(|n| require_text("name", n))
            .transpose()?,
        status,
        due_date: input
            .due_date
            .as_deref()
            .map(|d| parse_optional_date("due_date", Some(d)))
            .transpose()?,
        order_index: input.order_index,
        completion_pct: match status {
            Some(MilestoneStatus::Done) => Some(100),
            _ => completion_pct,
        },
    })
}
