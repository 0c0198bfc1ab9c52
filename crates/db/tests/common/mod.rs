//! Shared fixtures for store-backed tests.

#![allow(dead_code)]

use sirn_core::roles::Caller;
use sirn_core::types::DbId;
use sirn_db::board;
use sirn_db::models::profile::CreateStudentProfile;
use sirn_db::models::project::{CreateProject, Project};
use sirn_db::models::slot::{CreateSlot, ProjectSlot};
use sirn_db::models::specialty::{CreateSpecialty, Specialty};
use sirn_db::models::user::CreateUser;
use sqlx::PgPool;

pub async fn create_caller(pool: &PgPool, email: &str, role: &str) -> Caller {
    let user = board::create_user(
        pool,
        &CreateUser {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            role: role.to_string(),
        },
    )
    .await
    .unwrap();
    Caller {
        user_id: user.id,
        role: user.role,
    }
}

pub async fn admin(pool: &PgPool) -> Caller {
    create_caller(pool, "admin@sirn.test", "admin").await
}

pub async fn create_specialty(pool: &PgPool, slug: &str, display_order: i32) -> Specialty {
    board::create_specialty(
        pool,
        &CreateSpecialty {
            name: slug.replace('-', " "),
            slug: slug.to_string(),
            display_order: Some(display_order),
            is_active: None,
        },
    )
    .await
    .unwrap()
}

pub fn project_input(title: &str) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        ..Default::default()
    }
}

/// Create a project and move it to `active`.
pub async fn create_active_project(
    pool: &PgPool,
    caller: &Caller,
    specialty_id: DbId,
    title: &str,
) -> Project {
    let project = board::create_project(pool, caller, specialty_id, &project_input(title))
        .await
        .unwrap();
    board::set_project_status(pool, project.id, "active")
        .await
        .unwrap()
}

pub async fn create_slot(pool: &PgPool, project_id: DbId, role_name: &str) -> ProjectSlot {
    board::create_slot(
        pool,
        project_id,
        &CreateSlot {
            role_name: role_name.to_string(),
            est_hours: 10,
            description: None,
        },
    )
    .await
    .unwrap()
}

/// Create a student user with a profile, returning the profile ID.
pub async fn create_student(pool: &PgPool, email: &str, cv_url: Option<&str>) -> (Caller, DbId) {
    let caller = create_caller(pool, email, "student").await;
    let profile = board::create_student_profile(
        pool,
        caller.user_id,
        &CreateStudentProfile {
            year_program: "MS2".to_string(),
            skills: None,
            interests: None,
            weekly_hours: None,
            availability: None,
            irb_training_exp: None,
            cv_url: cv_url.map(str::to_string),
            portfolio_url: None,
        },
    )
    .await
    .unwrap();
    (caller, profile.id)
}
