//! Applications, acceptance policy and slot lifecycle.

mod common;

use assert_matches::assert_matches;
use common::{admin, create_active_project, create_slot, create_specialty, create_student};
use sirn_core::audit::AuditAction;
use sirn_core::error::CoreError;
use sirn_core::roles::Caller;
use sirn_core::status::{ApplicationStatus, SlotStatus};
use sirn_core::types::DbId;
use sirn_db::board;
use sirn_db::models::slot::{
    AcceptApplication, CreateApplication, CreateSlot, NewSlotAssignment, ProjectSlot,
    SlotApplication,
};
use sirn_db::error::classify_store_error;
use sirn_db::repositories::{ProjectSlotRepo, SlotAssignmentRepo};
use sqlx::PgPool;

async fn open_slot(pool: &PgPool) -> (Caller, ProjectSlot) {
    let caller = admin(pool).await;
    let specialty = create_specialty(pool, "oncology", 1).await;
    let project = create_active_project(pool, &caller, specialty.id, "Sarcoma registry").await;
    let slot = create_slot(pool, project.id, "Chart reviewer").await;
    (caller, slot)
}

async fn apply(pool: &PgPool, slot_id: DbId, email: &str) -> (Caller, SlotApplication) {
    let (student, student_id) = create_student(pool, email, Some("https://cv.example.org/me")).await;
    let application = board::apply_to_slot(
        pool,
        &student,
        slot_id,
        &CreateApplication {
            student_id,
            note: Some("  Interested  ".into()),
        },
    )
    .await
    .unwrap();
    (student, application)
}

// ---------------------------------------------------------------------------
// Applying
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_snapshots_cv_and_audits(pool: PgPool) {
    let (_, slot) = open_slot(&pool).await;
    let (student, application) = apply(&pool, slot.id, "amy@sirn.test").await;

    assert_eq!(application.status, ApplicationStatus::Submitted);
    assert_eq!(application.note.as_deref(), Some("Interested"));
    assert_eq!(
        application.cv_url_snapshot.as_deref(),
        Some("https://cv.example.org/me")
    );

    let events = board::list_audit_events(&pool, student.user_id, None)
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::ApplySlot);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_pending_application_conflicts(pool: PgPool) {
    let (_, slot) = open_slot(&pool).await;
    let (student, student_id) = create_student(&pool, "amy@sirn.test", None).await;
    let input = CreateApplication {
        student_id,
        note: None,
    };

    board::apply_to_slot(&pool, &student, slot.id, &input)
        .await
        .unwrap();
    let again = board::apply_to_slot(&pool, &student, slot.id, &input).await;
    assert_matches!(again, Err(CoreError::Conflict(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_to_closed_slot_conflicts(pool: PgPool) {
    let (_, slot) = open_slot(&pool).await;
    board::close_slot(&pool, slot.id).await.unwrap();

    let (student, student_id) = create_student(&pool, "amy@sirn.test", None).await;
    let result = board::apply_to_slot(
        &pool,
        &student,
        slot.id,
        &CreateApplication {
            student_id,
            note: None,
        },
    )
    .await;
    assert_matches!(result, Err(CoreError::Conflict(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_unknown_student_not_found(pool: PgPool) {
    let (caller, slot) = open_slot(&pool).await;
    let result = board::apply_to_slot(
        &pool,
        &caller,
        slot.id,
        &CreateApplication {
            student_id: DbId::new_v4(),
            note: None,
        },
    )
    .await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "StudentProfile", .. }));
}

// ---------------------------------------------------------------------------
// Accepting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_accept_assigns_and_rejects_competitors(pool: PgPool) {
    let (owner, slot) = open_slot(&pool).await;
    let (_, chosen) = apply(&pool, slot.id, "amy@sirn.test").await;
    let (_, other) = apply(&pool, slot.id, "ben@sirn.test").await;

    let accepted = board::accept_application(
        &pool,
        &owner,
        chosen.id,
        &AcceptApplication {
            note: Some("Welcome".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(accepted.application.status, ApplicationStatus::Accepted);
    assert_eq!(accepted.application.decided_by_user_id, Some(owner.user_id));
    assert!(accepted.application.decided_at.is_some());
    assert_eq!(accepted.assignment.student_id, chosen.student_id);
    assert_eq!(accepted.rejected_competitors, 1);

    let slot = ProjectSlotRepo::find_by_id(&pool, slot.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(slot.status, SlotStatus::Assigned);

    let applications = board::list_applications(&pool, slot.id).await.unwrap();
    let other = applications.iter().find(|a| a.id == other.id).unwrap();
    assert_eq!(other.status, ApplicationStatus::Rejected);
    assert_eq!(other.decided_by_user_id, Some(owner.user_id));

    let actions: Vec<AuditAction> = board::list_audit_events(&pool, owner.user_id, None)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.action)
        .collect();
    assert!(actions.contains(&AuditAction::AcceptApp));
    assert!(actions.contains(&AuditAction::AssignStudent));

    let detail = board::get_project_detail(&pool, slot.project_id).await.unwrap();
    assert!(detail.has_assignment(slot.id));
    let hidden = detail.slot_views(false);
    assert!(hidden[0].has_assignment);
    assert_eq!(hidden[0].assignee_student_id, None);
    assert_eq!(
        detail.slot_views(true)[0].assignee_student_id,
        Some(chosen.student_id)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_accept_on_assigned_slot_conflicts(pool: PgPool) {
    let (owner, slot) = open_slot(&pool).await;
    let (_, first) = apply(&pool, slot.id, "amy@sirn.test").await;

    board::accept_application(&pool, &owner, first.id, &AcceptApplication::default())
        .await
        .unwrap();
    let again =
        board::accept_application(&pool, &owner, first.id, &AcceptApplication::default()).await;
    assert_matches!(again, Err(CoreError::Conflict(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_accepts_exactly_one_wins(pool: PgPool) {
    let (owner, slot) = open_slot(&pool).await;
    let (_, a) = apply(&pool, slot.id, "amy@sirn.test").await;
    let (_, b) = apply(&pool, slot.id, "ben@sirn.test").await;

    let input = AcceptApplication::default();
    let (first, second) = tokio::join!(
        board::accept_application(&pool, &owner, a.id, &input),
        board::accept_application(&pool, &owner, b.id, &input),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    let failure = outcomes.into_iter().find(|r| r.is_err()).unwrap();
    assert_matches!(failure, Err(CoreError::Conflict(_)));

    let assignment = SlotAssignmentRepo::find_by_slot(&pool, slot.id)
        .await
        .unwrap();
    assert!(assignment.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_accept_and_reject_on_one_slot(pool: PgPool) {
    let (owner, slot) = open_slot(&pool).await;
    let (_, a) = apply(&pool, slot.id, "amy@sirn.test").await;
    let (_, b) = apply(&pool, slot.id, "ben@sirn.test").await;

    let input = AcceptApplication::default();
    let (accepted, rejected) = tokio::join!(
        board::accept_application(&pool, &owner, a.id, &input),
        board::reject_application(&pool, &owner, b.id),
    );

    // Whichever commits second sees `b` already rejected.
    assert!(accepted.is_ok());
    assert_matches!(rejected, Ok(_) | Err(CoreError::Validation(_)));

    let applications = board::list_applications(&pool, slot.id).await.unwrap();
    let status_of = |id| applications.iter().find(|app| app.id == id).unwrap().status;
    assert_eq!(status_of(a.id), ApplicationStatus::Accepted);
    assert_eq!(status_of(b.id), ApplicationStatus::Rejected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_assignment_row_conflicts(pool: PgPool) {
    let (_, slot) = open_slot(&pool).await;
    let (_, amy) = create_student(&pool, "amy@sirn.test", None).await;
    let (_, ben) = create_student(&pool, "ben@sirn.test", None).await;

    let assign = |student_id| NewSlotAssignment {
        slot_id: slot.id,
        student_id,
        note: None,
    };
    SlotAssignmentRepo::create(&pool, &assign(amy)).await.unwrap();
    let err = SlotAssignmentRepo::create(&pool, &assign(ben))
        .await
        .unwrap_err();
    assert_matches!(classify_store_error(err), CoreError::Conflict(_));
}

// ---------------------------------------------------------------------------
// Rejecting and withdrawing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reject_only_pending(pool: PgPool) {
    let (owner, slot) = open_slot(&pool).await;
    let (_, application) = apply(&pool, slot.id, "amy@sirn.test").await;

    let rejected = board::reject_application(&pool, &owner, application.id)
        .await
        .unwrap();
    assert_eq!(rejected.status, ApplicationStatus::Rejected);

    let again = board::reject_application(&pool, &owner, application.id).await;
    assert_matches!(again, Err(CoreError::Validation(_)));

    let events = board::list_audit_events(&pool, owner.user_id, None)
        .await
        .unwrap();
    assert_eq!(events[0].action, AuditAction::RejectApp);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_withdraw_only_pending(pool: PgPool) {
    let (owner, slot) = open_slot(&pool).await;
    let (_, application) = apply(&pool, slot.id, "amy@sirn.test").await;

    let withdrawn = board::withdraw_application(&pool, application.id)
        .await
        .unwrap();
    assert_eq!(withdrawn.status, ApplicationStatus::Withdrawn);

    assert_matches!(
        board::withdraw_application(&pool, application.id).await,
        Err(CoreError::Validation(_))
    );
    assert_matches!(
        board::withdraw_application(&pool, DbId::new_v4()).await,
        Err(CoreError::NotFound { .. })
    );

    // A withdrawn application cannot be accepted.
    let accept =
        board::accept_application(&pool, &owner, application.id, &AcceptApplication::default())
            .await;
    assert_matches!(accept, Err(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_withdrawn_student_may_reapply(pool: PgPool) {
    let (_, slot) = open_slot(&pool).await;
    let (student, student_id) = create_student(&pool, "amy@sirn.test", None).await;
    let input = CreateApplication {
        student_id,
        note: None,
    };

    let first = board::apply_to_slot(&pool, &student, slot.id, &input)
        .await
        .unwrap();
    board::withdraw_application(&pool, first.id).await.unwrap();
    let second = board::apply_to_slot(&pool, &student, slot.id, &input).await;
    assert!(second.is_ok());
}

// ---------------------------------------------------------------------------
// Slot lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_close_assigned_slot_conflicts(pool: PgPool) {
    let (owner, slot) = open_slot(&pool).await;
    let (_, application) = apply(&pool, slot.id, "amy@sirn.test").await;
    board::accept_application(&pool, &owner, application.id, &AcceptApplication::default())
        .await
        .unwrap();

    assert_matches!(
        board::close_slot(&pool, slot.id).await,
        Err(CoreError::Conflict(_))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_close_slot_is_idempotent(pool: PgPool) {
    let (_, slot) = open_slot(&pool).await;
    let closed = board::close_slot(&pool, slot.id).await.unwrap();
    assert_eq!(closed.status, SlotStatus::Closed);
    let again = board::close_slot(&pool, slot.id).await.unwrap();
    assert_eq!(again.status, SlotStatus::Closed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_slot_validation(pool: PgPool) {
    let (_, slot) = open_slot(&pool).await;
    let result = board::create_slot(
        &pool,
        slot.project_id,
        &CreateSlot {
            role_name: "Analyst".into(),
            est_hours: 0,
            description: None,
        },
    )
    .await;
    assert_matches!(result, Err(CoreError::Validation(_)));

    let missing = board::create_slot(
        &pool,
        DbId::new_v4(),
        &CreateSlot {
            role_name: "Analyst".into(),
            est_hours: 5,
            description: None,
        },
    )
    .await;
    assert_matches!(missing, Err(CoreError::NotFound { entity: "Project", .. }));
}
