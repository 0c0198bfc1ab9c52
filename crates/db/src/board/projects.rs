//! Project listing, detail, creation and update.

use std::collections::HashMap;

use serde_json::json;
use sirn_core::audit::AuditAction;
use sirn_core::error::CoreError;
use sirn_core::normalize::{blank_to_none, parse_optional_date, require_text, validate_percent};
use sirn_core::roles::{Caller, ResearcherPosition};
use sirn_core::status::{IrbStatus, ProjectStatus};
use sirn_core::types::DbId;
use sqlx::PgPool;

use crate::board::audit;
use crate::error::classify_store_error;
use crate::models::project::{
    CreateProject, CreateProjectOwner, NewProject, Project, ProjectDetail, ProjectOwner,
    ProjectPatch, ProjectWithSlotStats, UpdateProject,
};
use crate::models::specialty::Specialty;
use crate::repositories::{
    ProjectMilestoneRepo, ProjectOwnerRepo, ProjectRepo, ProjectResourceRepo, ProjectSlotRepo,
    SlotAssignmentRepo, SpecialtyRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// List a specialty's active projects with total and open slot counts.
pub async fn list_active_projects(
    pool: &PgPool,
    specialty_id: DbId,
) -> Result<Vec<ProjectWithSlotStats>, CoreError> {
    ProjectRepo::list_active_with_slot_stats(pool, specialty_id)
        .await
        .map_err(classify_store_error)
}

/// Resolve a specialty by slug, then list its active projects.
pub async fn list_active_projects_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<(Specialty, Vec<ProjectWithSlotStats>), CoreError> {
    let specialty = super::get_specialty_by_slug(pool, slug).await?;
    let projects = list_active_projects(pool, specialty.id).await?;
    Ok((specialty, projects))
}

pub async fn get_project(pool: &PgPool, project_id: DbId) -> Result<Project, CoreError> {
    ProjectRepo::find_by_id(pool, project_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Project", project_id))
}

/// Load a project with its slots, milestones, resources and assignments.
///
/// Assignments for every slot are fetched in a single query, so the number
/// of round trips does not depend on the slot count.
pub async fn get_project_detail(
    pool: &PgPool,
    project_id: DbId,
) -> Result<ProjectDetail, CoreError> {
    let project = get_project(pool, project_id).await?;

    let slots = ProjectSlotRepo::list_by_project(pool, project_id)
        .await
        .map_err(classify_store_error)?;
    let milestones = ProjectMilestoneRepo::list_by_project(pool, project_id)
        .await
        .map_err(classify_store_error)?;
    let resources = ProjectResourceRepo::list_by_project(pool, project_id)
        .await
        .map_err(classify_store_error)?;

    let slot_ids: Vec<DbId> = slots.iter().map(|s| s.id).collect();
    let assignments_by_slot: HashMap<_, _> = SlotAssignmentRepo::list_by_slot_ids(pool, &slot_ids)
        .await
        .map_err(classify_store_error)?
        .into_iter()
        .map(|a| (a.slot_id, a))
        .collect();

    Ok(ProjectDetail {
        project,
        slots,
        milestones,
        resources,
        assignments_by_slot,
    })
}

/// Whether `caller` may see who is assigned to the project's slots.
///
/// Admins always can; otherwise only the project's owners.
pub async fn can_view_assignees(
    pool: &PgPool,
    caller: Option<&Caller>,
    project_id: DbId,
) -> Result<bool, CoreError> {
    match caller {
        None => Ok(false),
        Some(caller) if caller.is_admin() => Ok(true),
        Some(caller) => ProjectOwnerRepo::is_owner(pool, project_id, caller.user_id)
            .await
            .map_err(classify_store_error),
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Create a project in `specialty_id` and record a `create_project` audit
/// event for `caller`. Both rows commit together.
pub async fn create_project(
    pool: &PgPool,
    caller: &Caller,
    specialty_id: DbId,
    input: &CreateProject,
) -> Result<Project, CoreError> {
    let new = normalize_new_project(specialty_id, input)?;

    SpecialtyRepo::find_by_id(pool, specialty_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Specialty", specialty_id))?;

    let mut tx = pool.begin().await.map_err(classify_store_error)?;

    let project = ProjectRepo::create(&mut *tx, &new)
        .await
        .map_err(classify_store_error)?;

    audit::record(
        &mut *tx,
        caller,
        AuditAction::CreateProject,
        json!({ "project_id": project.id, "specialty_id": specialty_id }),
    )
    .await?;

    tx.commit().await.map_err(classify_store_error)?;

    tracing::info!(
        project_id = %project.id,
        specialty_id = %specialty_id,
        user_id = %caller.user_id,
        "Project created"
    );
    Ok(project)
}

/// Apply a partial update. Omitted fields keep their stored value.
pub async fn update_project(
    pool: &PgPool,
    project_id: DbId,
    input: &UpdateProject,
) -> Result<Project, CoreError> {
    let patch = normalize_project_patch(input)?;

    let project = ProjectRepo::update(pool, project_id, &patch)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;

    tracing::info!(project_id = %project_id, "Project updated");
    Ok(project)
}

pub async fn set_project_status(
    pool: &PgPool,
    project_id: DbId,
    status: &str,
) -> Result<Project, CoreError> {
    let status = status.trim().parse::<ProjectStatus>()?;

    let project = ProjectRepo::set_status(pool, project_id, status)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;

    tracing::info!(project_id = %project_id, status = %status, "Project status changed");
    Ok(project)
}

pub async fn set_project_progress(
    pool: &PgPool,
    project_id: DbId,
    progress_pct: i32,
) -> Result<Project, CoreError> {
    let progress_pct = validate_percent("progress_pct", progress_pct)?;

    let project = ProjectRepo::set_progress(pool, project_id, progress_pct)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Project", project_id))?;

    tracing::info!(project_id = %project_id, progress_pct, "Project progress changed");
    Ok(project)
}

/// Add a researcher as an owner of a project. Re-adding an owner fails with
/// `Conflict`.
pub async fn add_project_owner(
    pool: &PgPool,
    project_id: DbId,
    input: &CreateProjectOwner,
) -> Result<ProjectOwner, CoreError> {
    let position = input.owner_position.trim().parse::<ResearcherPosition>()?;
    ensure_project_exists(pool, project_id).await?;
    UserRepo::find_by_id(pool, input.user_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("User", input.user_id))?;

    let owner = ProjectOwnerRepo::create(pool, project_id, input.user_id, position)
        .await
        .map_err(classify_store_error)?;

    tracing::info!(project_id = %project_id, user_id = %input.user_id, "Project owner added");
    Ok(owner)
}

pub async fn list_project_owners(
    pool: &PgPool,
    project_id: DbId,
) -> Result<Vec<ProjectOwner>, CoreError> {
    ensure_project_exists(pool, project_id).await?;
    ProjectOwnerRepo::list_by_project(pool, project_id)
        .await
        .map_err(classify_store_error)
}

/// Hard-delete a project and everything under it.
pub async fn delete_project(pool: &PgPool, project_id: DbId) -> Result<(), CoreError> {
    let deleted = ProjectRepo::delete(pool, project_id)
        .await
        .map_err(classify_store_error)?;
    if !deleted {
        return Err(CoreError::not_found("Project", project_id));
    }
    tracing::info!(project_id = %project_id, "Project deleted");
    Ok(())
}

pub(crate) async fn ensure_project_exists(pool: &PgPool, project_id: DbId) -> Result<(), CoreError> {
    get_project(pool, project_id).await.map(|_| ())
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Parse an enumerated field, treating a blank value as unspecified.
fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: std::str::FromStr<Err = CoreError>,
{
    blank_to_none(value).map(|v| v.parse::<T>()).transpose()
}

pub(crate) fn normalize_new_project(
    specialty_id: DbId,
    input: &CreateProject,
) -> Result<NewProject, CoreError> {
    Ok(NewProject {
        specialty_id,
        title: require_text("title", &input.title)?,
        description: blank_to_none(input.description.as_deref()),
        deliverables: input
            .deliverables
            .as_ref()
            .map(|d| d.normalize())
            .unwrap_or_default(),
        irb_status: parse_optional::<IrbStatus>(input.irb_status.as_deref())?.unwrap_or_default(),
        irb_number: blank_to_none(input.irb_number.as_deref()),
        start_date: parse_optional_date("start_date", input.start_date.as_deref())?,
        target_date: parse_optional_date("target_date", input.target_date.as_deref())?,
        status: parse_optional::<ProjectStatus>(input.status.as_deref())?.unwrap_or_default(),
    })
}

pub(crate) fn normalize_project_patch(input: &UpdateProject) -> Result<ProjectPatch, CoreError> {
    Ok(ProjectPatch {
        title: input
            .title
            .as_deref()
            .map(|t| require_text("title", t))
            .transpose()?,
        description: input
            .description
            .as_deref()
            .map(|d| blank_to_none(Some(d))),
        deliverables: input.deliverables.as_ref().map(|d| d.normalize()),
        irb_status: parse_optional::<IrbStatus>(input.irb_status.as_deref())?,
        irb_number: input.irb_number.as_deref().map(|n| blank_to_none(Some(n))),
        start_date: input
            .start_date
            .as_deref()
            .map(|d| parse_optional_date("start_date", Some(d)))
            .transpose()?,
        target_date: input
            .target_date
            .as_deref()
            .map(|d| parse_optional_date("target_date", Some(d)))
            .transpose()?,
    })
}
