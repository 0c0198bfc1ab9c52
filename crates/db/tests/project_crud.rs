//! Project creation, update, detail retrieval and cascades.

mod common;

use assert_matches::assert_matches;
use common::{admin, create_active_project, create_caller, create_slot, create_specialty, project_input};
use sirn_core::audit::AuditAction;
use sirn_core::error::CoreError;
use sirn_core::normalize::ListInput;
use sirn_core::status::{IrbStatus, MilestoneStatus, ProjectStatus, ResourceType};
use sirn_core::types::DbId;
use sirn_db::board;
use sirn_db::models::milestone::{CreateMilestone, UpdateMilestone};
use sirn_db::models::project::{CreateProject, CreateProjectOwner, UpdateProject};
use sirn_db::models::resource::CreateResource;
use sirn_db::repositories::{ProjectSlotRepo, SpecialtyRepo};
use sqlx::PgPool;

fn milestone(name: &str, order_index: Option<i32>) -> CreateMilestone {
    CreateMilestone {
        name: name.to_string(),
        due_date: None,
        order_index,
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_defaults_and_audit(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;

    let project = board::create_project(&pool, &caller, specialty.id, &project_input("T"))
        .await
        .unwrap();
    assert_eq!(project.status, ProjectStatus::Draft);
    assert_eq!(project.irb_status, IrbStatus::Pending);
    assert_eq!(project.progress_pct, 0);
    assert!(project.deliverables.is_empty());

    let events = board::list_audit_events(&pool, caller.user_id, None)
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, AuditAction::CreateProject);
    let context: serde_json::Value =
        serde_json::from_str(events[0].context.as_deref().unwrap()).unwrap();
    assert_eq!(context["project_id"], project.id.to_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deliverables_round_trip_trimmed(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;

    let input = CreateProject {
        deliverables: Some(ListInput::Text(" a , b ,, c ".into())),
        ..project_input("T")
    };
    let project = board::create_project(&pool, &caller, specialty.id, &input)
        .await
        .unwrap();

    let detail = board::get_project_detail(&pool, project.id).await.unwrap();
    assert_eq!(detail.project.deliverables, vec!["a", "b", "c"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_optional_fields_stored_as_null(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;

    let input = CreateProject {
        irb_number: Some(String::new()),
        description: Some("   ".into()),
        start_date: Some(String::new()),
        ..project_input("T")
    };
    let project = board::create_project(&pool, &caller, specialty.id, &input)
        .await
        .unwrap();
    assert_eq!(project.irb_number, None);
    assert_eq!(project.description, None);
    assert_eq!(project.start_date, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_unknown_specialty(pool: PgPool) {
    let caller = admin(&pool).await;
    let result = board::create_project(&pool, &caller, DbId::new_v4(), &project_input("T")).await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "Specialty", .. }));

    let events = board::list_audit_events(&pool, caller.user_id, None)
        .await
        .unwrap();
    assert!(events.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_project_validation(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;

    let blank = board::create_project(&pool, &caller, specialty.id, &project_input(" ")).await;
    assert_matches!(blank, Err(CoreError::Validation(_)));

    let bad_irb = CreateProject {
        irb_status: Some("granted".into()),
        ..project_input("T")
    };
    let result = board::create_project(&pool, &caller, specialty.id, &bad_irb).await;
    assert_matches!(result, Err(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_title_is_idempotent(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;
    let input = CreateProject {
        description: Some("Retrospective review".into()),
        deliverables: Some(ListInput::Items(vec!["abstract".into()])),
        irb_number: Some("IRB-1".into()),
        ..project_input("Before")
    };
    let original = board::create_project(&pool, &caller, specialty.id, &input)
        .await
        .unwrap();

    let update = UpdateProject {
        title: Some("X".into()),
        ..Default::default()
    };
    let first = board::update_project(&pool, original.id, &update).await.unwrap();
    let second = board::update_project(&pool, original.id, &update).await.unwrap();

    assert_eq!(first.title, "X");
    assert_eq!(second.title, "X");
    assert_eq!(second.description, original.description);
    assert_eq!(second.deliverables, original.deliverables);
    assert_eq!(second.irb_number, original.irb_number);
    assert_eq!(second.irb_status, original.irb_status);
    assert_eq!(second.status, original.status);
    assert_eq!(second.specialty_id, original.specialty_id);
    assert_eq!(second.created_at, original.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_normalizes_and_clears(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;
    let input = CreateProject {
        irb_number: Some("IRB-1".into()),
        target_date: Some("2026-12-01".into()),
        ..project_input("T")
    };
    let project = board::create_project(&pool, &caller, specialty.id, &input)
        .await
        .unwrap();

    let updated = board::update_project(
        &pool,
        project.id,
        &UpdateProject {
            irb_number: Some("".into()),
            target_date: Some(" ".into()),
            deliverables: Some(ListInput::Text("poster, ,manuscript".into())),
            irb_status: Some("approved".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.irb_number, None);
    assert_eq!(updated.target_date, None);
    assert_eq!(updated.deliverables, vec!["poster", "manuscript"]);
    assert_eq!(updated.irb_status, IrbStatus::Approved);
    assert_eq!(updated.title, "T");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_project_not_found(pool: PgPool) {
    let result = board::update_project(
        &pool,
        DbId::new_v4(),
        &UpdateProject {
            title: Some("X".into()),
            ..Default::default()
        },
    )
    .await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "Project", .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_and_progress(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;
    let project = board::create_project(&pool, &caller, specialty.id, &project_input("T"))
        .await
        .unwrap();

    let paused = board::set_project_status(&pool, project.id, "paused")
        .await
        .unwrap();
    assert_eq!(paused.status, ProjectStatus::Paused);

    let bad = board::set_project_status(&pool, project.id, "done").await;
    assert_matches!(bad, Err(CoreError::Validation(_)));

    let progressed = board::set_project_progress(&pool, project.id, 45)
        .await
        .unwrap();
    assert_eq!(progressed.progress_pct, 45);

    let out_of_range = board::set_project_progress(&pool, project.id, 120).await;
    assert_matches!(out_of_range, Err(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_missing_project_not_found(pool: PgPool) {
    let result = board::get_project_detail(&pool, DbId::new_v4()).await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "Project", .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_collects_children(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;
    let project = create_active_project(&pool, &caller, specialty.id, "Detail").await;

    create_slot(&pool, project.id, "Analyst").await;
    create_slot(&pool, project.id, "Writer").await;
    board::create_milestone(&pool, project.id, &milestone("Submit", Some(5)))
        .await
        .unwrap();
    board::create_milestone(&pool, project.id, &milestone("Kickoff", Some(1)))
        .await
        .unwrap();
    board::add_resource(
        &pool,
        project.id,
        &CreateResource {
            resource_type: "protocol".into(),
            url: "https://drive.example.org/protocol".into(),
            label: Some(" ".into()),
        },
    )
    .await
    .unwrap();

    let detail = board::get_project_detail(&pool, project.id).await.unwrap();
    assert_eq!(detail.slots.len(), 2);
    let names: Vec<&str> = detail.milestones.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Kickoff", "Submit"]);
    assert_eq!(detail.resources.len(), 1);
    assert_eq!(detail.resources[0].resource_type, ResourceType::Protocol);
    assert_eq!(detail.resources[0].label, None);
    assert!(detail.assignments_by_slot.is_empty());
    assert!(detail.slot_views(true).iter().all(|v| !v.has_assignment));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assignee_visibility(pool: PgPool) {
    let admin = admin(&pool).await;
    let owner = create_caller(&pool, "owner@sirn.test", "owner").await;
    let outsider = create_caller(&pool, "other@sirn.test", "owner").await;
    let specialty = create_specialty(&pool, "oncology", 1).await;
    let project = create_active_project(&pool, &admin, specialty.id, "Visible").await;

    board::add_project_owner(
        &pool,
        project.id,
        &CreateProjectOwner {
            user_id: owner.user_id,
            owner_position: "attending".into(),
        },
    )
    .await
    .unwrap();

    assert!(board::can_view_assignees(&pool, Some(&admin), project.id).await.unwrap());
    assert!(board::can_view_assignees(&pool, Some(&owner), project.id).await.unwrap());
    assert!(!board::can_view_assignees(&pool, Some(&outsider), project.id).await.unwrap());
    assert!(!board::can_view_assignees(&pool, None, project.id).await.unwrap());

    let owners = board::list_project_owners(&pool, project.id).await.unwrap();
    assert_eq!(owners.len(), 1);

    let again = board::add_project_owner(
        &pool,
        project.id,
        &CreateProjectOwner {
            user_id: owner.user_id,
            owner_position: "fellow".into(),
        },
    )
    .await;
    assert_matches!(again, Err(CoreError::Conflict(_)));
}

// ---------------------------------------------------------------------------
// Milestones
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_milestone_append_and_update(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;
    let project = create_active_project(&pool, &caller, specialty.id, "Milestones").await;

    let first = board::create_milestone(&pool, project.id, &milestone("Kickoff", None))
        .await
        .unwrap();
    let second = board::create_milestone(&pool, project.id, &milestone("Data pull", None))
        .await
        .unwrap();
    assert_eq!(first.order_index, 0);
    assert_eq!(second.order_index, 1);
    assert_eq!(second.status, MilestoneStatus::Todo);

    let done = board::update_milestone(
        &pool,
        &caller,
        second.id,
        &UpdateMilestone {
            status: Some("done".into()),
            completion_pct: Some(30),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(done.status, MilestoneStatus::Done);
    assert_eq!(done.completion_pct, 100);
    assert_eq!(done.name, "Data pull");

    let events = board::list_audit_events(&pool, caller.user_id, None)
        .await
        .unwrap();
    assert_eq!(events[0].action, AuditAction::UpdateMilestone);

    let missing = board::update_milestone(
        &pool,
        &caller,
        DbId::new_v4(),
        &UpdateMilestone::default(),
    )
    .await;
    assert_matches!(missing, Err(CoreError::NotFound { entity: "Milestone", .. }));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resource_url_must_be_http(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;
    let project = create_active_project(&pool, &caller, specialty.id, "Links").await;

    let result = board::add_resource(
        &pool,
        project.id,
        &CreateResource {
            resource_type: "drive".into(),
            url: "ftp://files.example.org".into(),
            label: None,
        },
    )
    .await;
    assert_matches!(result, Err(CoreError::Validation(_)));
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_specialty_cascades(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;
    let project = create_active_project(&pool, &caller, specialty.id, "Doomed").await;
    let slot = create_slot(&pool, project.id, "Analyst").await;

    board::delete_specialty(&pool, specialty.id).await.unwrap();

    assert!(SpecialtyRepo::find_by_id(&pool, specialty.id).await.unwrap().is_none());
    assert_matches!(
        board::get_project(&pool, project.id).await,
        Err(CoreError::NotFound { .. })
    );
    assert!(ProjectSlotRepo::find_by_id(&pool, slot.id).await.unwrap().is_none());

    assert_matches!(
        board::delete_specialty(&pool, specialty.id).await,
        Err(CoreError::NotFound { .. })
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_project_cascades(pool: PgPool) {
    let caller = admin(&pool).await;
    let specialty = create_specialty(&pool, "oncology", 1).await;
    let project = create_active_project(&pool, &caller, specialty.id, "Doomed").await;
    let slot = create_slot(&pool, project.id, "Analyst").await;

    board::delete_project(&pool, project.id).await.unwrap();
    assert!(ProjectSlotRepo::find_by_id(&pool, slot.id).await.unwrap().is_none());
    assert_matches!(
        board::delete_project(&pool, project.id).await,
        Err(CoreError::NotFound { .. })
    );
}
