//! Slots, applications and assignments.
//!
//! Transitions that touch a slot (apply, accept, close) run in one
//! transaction and lock the slot row before any of its applications, so
//! concurrent decisions on the same slot serialize on that lock. Reject and
//! withdraw change a single application row and never take the slot lock.

use serde_json::json;
use sirn_core::audit::AuditAction;
use sirn_core::error::CoreError;
use sirn_core::normalize::{blank_to_none, require_text};
use sirn_core::roles::Caller;
use sirn_core::status::{ApplicationStatus, SlotStatus};
use sirn_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::board::audit;
use crate::board::projects::ensure_project_exists;
use crate::error::classify_store_error;
use crate::models::slot::{
    AcceptApplication, AcceptedApplication, CreateApplication, CreateSlot, NewApplication,
    NewSlotAssignment, ProjectSlot, SlotApplication,
};
use crate::repositories::{
    ProjectSlotRepo, SlotApplicationRepo, SlotAssignmentRepo, StudentProfileRepo,
};

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Open a new slot on a project.
pub async fn create_slot(
    pool: &PgPool,
    project_id: DbId,
    input: &CreateSlot,
) -> Result<ProjectSlot, CoreError> {
    if input.est_hours <= 0 {
        return Err(CoreError::Validation(format!(
            "est_hours must be positive, got {}",
            input.est_hours
        )));
    }
    let normalized = CreateSlot {
        role_name: require_text("role_name", &input.role_name)?,
        est_hours: input.est_hours,
        description: blank_to_none(input.description.as_deref()),
    };
    ensure_project_exists(pool, project_id).await?;

    let slot = ProjectSlotRepo::create(pool, project_id, &normalized)
        .await
        .map_err(classify_store_error)?;

    tracing::info!(slot_id = %slot.id, project_id = %project_id, "Slot created");
    Ok(slot)
}

/// Close a slot to new applications. Closing a closed slot is a no-op; an
/// assigned slot cannot be closed.
pub async fn close_slot(pool: &PgPool, slot_id: DbId) -> Result<ProjectSlot, CoreError> {
    let mut tx = pool.begin().await.map_err(classify_store_error)?;

    let slot = lock_slot(&mut tx, slot_id).await?;
    let slot = match slot.status {
        SlotStatus::Closed => slot,
        SlotStatus::Assigned => {
            return Err(CoreError::Conflict(format!(
                "Slot {slot_id} is assigned and cannot be closed"
            )));
        }
        SlotStatus::Open => ProjectSlotRepo::set_status(&mut *tx, slot_id, SlotStatus::Closed)
            .await
            .map_err(classify_store_error)?
            .ok_or_else(|| CoreError::not_found("Slot", slot_id))?,
    };

    tx.commit().await.map_err(classify_store_error)?;

    tracing::info!(slot_id = %slot_id, "Slot closed");
    Ok(slot)
}

/// List a slot's applications, oldest first.
pub async fn list_applications(
    pool: &PgPool,
    slot_id: DbId,
) -> Result<Vec<SlotApplication>, CoreError> {
    ProjectSlotRepo::find_by_id(pool, slot_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Slot", slot_id))?;

    SlotApplicationRepo::list_by_slot(pool, slot_id)
        .await
        .map_err(classify_store_error)
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// Submit a student's application to an open slot.
///
/// The student's current CV link is copied onto the application so later
/// profile edits do not change what was submitted.
pub async fn apply_to_slot(
    pool: &PgPool,
    caller: &Caller,
    slot_id: DbId,
    input: &CreateApplication,
) -> Result<SlotApplication, CoreError> {
    let student = StudentProfileRepo::find_by_id(pool, input.student_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("StudentProfile", input.student_id))?;

    let mut tx = pool.begin().await.map_err(classify_store_error)?;

    let slot = lock_slot(&mut tx, slot_id).await?;
    if slot.status != SlotStatus::Open {
        return Err(CoreError::Conflict(format!(
            "Slot {slot_id} is {} and not accepting applications",
            slot.status
        )));
    }

    let new = NewApplication {
        slot_id,
        student_id: student.id,
        note: blank_to_none(input.note.as_deref()),
        cv_url_snapshot: student.cv_url.clone(),
    };
    let application = SlotApplicationRepo::create(&mut *tx, &new)
        .await
        .map_err(classify_store_error)?;

    audit::record(
        &mut *tx,
        caller,
        AuditAction::ApplySlot,
        json!({
            "application_id": application.id,
            "slot_id": slot_id,
            "student_id": student.id,
        }),
    )
    .await?;

    tx.commit().await.map_err(classify_store_error)?;

    tracing::info!(
        application_id = %application.id,
        slot_id = %slot_id,
        student_id = %student.id,
        "Application submitted"
    );
    Ok(application)
}

/// Accept an application and assign its student to the slot.
///
/// In one transaction: the assignment is created, the application is marked
/// `accepted`, every other `submitted` application for the slot is marked
/// `rejected`, the slot becomes `assigned`, and `accept_app` plus
/// `assign_student` events are recorded. A second acceptance for the same
/// slot fails with `Conflict`.
pub async fn accept_application(
    pool: &PgPool,
    caller: &Caller,
    application_id: DbId,
    input: &AcceptApplication,
) -> Result<AcceptedApplication, CoreError> {
    let mut tx = pool.begin().await.map_err(classify_store_error)?;

    let slot_id = SlotApplicationRepo::find_by_id(&mut *tx, application_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Application", application_id))?
        .slot_id;

    // Slot first, then the application, matching every other writer.
    let slot = lock_slot(&mut tx, slot_id).await?;
    let application = lock_application(&mut tx, application_id).await?;

    if slot.status != SlotStatus::Open {
        return Err(CoreError::Conflict(format!(
            "Slot {slot_id} is {} and cannot take another assignment",
            slot.status
        )));
    }
    ensure_pending(&application)?;

    let assignment = SlotAssignmentRepo::create(
        &mut *tx,
        &NewSlotAssignment {
            slot_id,
            student_id: application.student_id,
            note: blank_to_none(input.note.as_deref()),
        },
    )
    .await
    .map_err(classify_store_error)?;

    let application = SlotApplicationRepo::decide(
        &mut *tx,
        application_id,
        ApplicationStatus::Accepted,
        caller.user_id,
    )
    .await
    .map_err(classify_store_error)?
    .ok_or_else(|| {
        CoreError::Conflict(format!("Application {application_id} was decided concurrently"))
    })?;

    let rejected_competitors =
        SlotApplicationRepo::reject_competitors(&mut *tx, slot_id, application_id, caller.user_id)
            .await
            .map_err(classify_store_error)?;

    ProjectSlotRepo::set_status(&mut *tx, slot_id, SlotStatus::Assigned)
        .await
        .map_err(classify_store_error)?;

    audit::record(
        &mut *tx,
        caller,
        AuditAction::AcceptApp,
        json!({
            "application_id": application_id,
            "slot_id": slot_id,
            "rejected_competitors": rejected_competitors,
        }),
    )
    .await?;
    audit::record(
        &mut *tx,
        caller,
        AuditAction::AssignStudent,
        json!({
            "assignment_id": assignment.id,
            "slot_id": slot_id,
            "student_id": assignment.student_id,
        }),
    )
    .await?;

    tx.commit().await.map_err(classify_store_error)?;

    tracing::info!(
        application_id = %application_id,
        slot_id = %slot_id,
        student_id = %assignment.student_id,
        rejected_competitors,
        "Application accepted, student assigned"
    );
    Ok(AcceptedApplication {
        application,
        assignment,
        rejected_competitors,
    })
}

/// Reject a pending application and record a `reject_app` event.
pub async fn reject_application(
    pool: &PgPool,
    caller: &Caller,
    application_id: DbId,
) -> Result<SlotApplication, CoreError> {
    let mut tx = pool.begin().await.map_err(classify_store_error)?;

    let application = lock_application(&mut tx, application_id).await?;
    ensure_pending(&application)?;

    let application = SlotApplicationRepo::decide(
        &mut *tx,
        application_id,
        ApplicationStatus::Rejected,
        caller.user_id,
    )
    .await
    .map_err(classify_store_error)?
    .ok_or_else(|| CoreError::not_found("Application", application_id))?;

    audit::record(
        &mut *tx,
        caller,
        AuditAction::RejectApp,
        json!({ "application_id": application_id, "slot_id": application.slot_id }),
    )
    .await?;

    tx.commit().await.map_err(classify_store_error)?;

    tracing::info!(application_id = %application_id, "Application rejected");
    Ok(application)
}

/// Withdraw a pending application on the student's behalf.
pub async fn withdraw_application(
    pool: &PgPool,
    application_id: DbId,
) -> Result<SlotApplication, CoreError> {
    if let Some(application) = SlotApplicationRepo::withdraw(pool, application_id)
        .await
        .map_err(classify_store_error)?
    {
        tracing::info!(application_id = %application_id, "Application withdrawn");
        return Ok(application);
    }

    // Nothing changed: either it does not exist or it was already decided.
    let existing = SlotApplicationRepo::find_by_id(pool, application_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Application", application_id))?;
    Err(not_pending(&existing))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn lock_slot(conn: &mut PgConnection, slot_id: DbId) -> Result<ProjectSlot, CoreError> {
    ProjectSlotRepo::find_for_update(conn, slot_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Slot", slot_id))
}

async fn lock_application(
    conn: &mut PgConnection,
    application_id: DbId,
) -> Result<SlotApplication, CoreError> {
    SlotApplicationRepo::find_for_update(conn, application_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Application", application_id))
}

fn ensure_pending(application: &SlotApplication) -> Result<(), CoreError> {
    if application.status.is_pending() {
        Ok(())
    } else {
        Err(not_pending(application))
    }
}

fn not_pending(application: &SlotApplication) -> CoreError {
    CoreError::Validation(format!(
        "Application {} is already {}; only submitted applications can change",
        application.id, application.status
    ))
}
