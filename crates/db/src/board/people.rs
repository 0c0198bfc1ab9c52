//! Users, caller resolution and profiles.

use sirn_core::error::CoreError;
use sirn_core::normalize::{blank_to_none, normalize_email, parse_optional_date, require_text};
use sirn_core::roles::{Caller, ResearcherPosition, UserRole};
use sirn_core::types::DbId;
use sqlx::PgPool;

use crate::error::classify_store_error;
use crate::models::profile::{
    CreateResearcherProfile, CreateStudentProfile, NewResearcherProfile, NewStudentProfile,
    ResearcherProfile, StudentProfile,
};
use crate::models::user::{CreateUser, NewUser, User};
use crate::repositories::{ResearcherProfileRepo, StudentProfileRepo, UserRepo};

/// Create a user. Duplicate emails fail with `Conflict`.
pub async fn create_user(pool: &PgPool, input: &CreateUser) -> Result<User, CoreError> {
    let new = NewUser {
        email: normalize_email(&input.email)?,
        name: require_text("name", &input.name)?,
        role: input.role.trim().parse::<UserRole>()?,
    };

    let user = UserRepo::create(pool, &new)
        .await
        .map_err(classify_store_error)?;

    tracing::info!(user_id = %user.id, role = %user.role, "User created");
    Ok(user)
}

pub async fn get_user(pool: &PgPool, user_id: DbId) -> Result<User, CoreError> {
    UserRepo::find_by_id(pool, user_id)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("User", user_id))
}

/// Resolve an externally authenticated user ID into a [`Caller`].
pub async fn resolve_caller(pool: &PgPool, user_id: DbId) -> Result<Caller, CoreError> {
    let user = get_user(pool, user_id).await?;
    Ok(Caller {
        user_id: user.id,
        role: user.role,
    })
}

pub async fn create_researcher_profile(
    pool: &PgPool,
    user_id: DbId,
    input: &CreateResearcherProfile,
) -> Result<ResearcherProfile, CoreError> {
    get_user(pool, user_id).await?;

    let new = NewResearcherProfile {
        user_id,
        position: input.position.trim().parse::<ResearcherPosition>()?,
        specialty: require_text("specialty", &input.specialty)?,
        department: blank_to_none(input.department.as_deref()),
        institution: blank_to_none(input.institution.as_deref()),
        irb_training_exp: parse_optional_date(
            "irb_training_exp",
            input.irb_training_exp.as_deref(),
        )?,
        mentorship_focus: blank_to_none(input.mentorship_focus.as_deref()),
        biosketch_url: blank_to_none(input.biosketch_url.as_deref()),
    };

    let profile = ResearcherProfileRepo::create(pool, &new)
        .await
        .map_err(classify_store_error)?;

    tracing::info!(user_id = %user_id, profile_id = %profile.id, "Researcher profile created");
    Ok(profile)
}

pub async fn create_student_profile(
    pool: &PgPool,
    user_id: DbId,
    input: &CreateStudentProfile,
) -> Result<StudentProfile, CoreError> {
    get_user(pool, user_id).await?;

    let new = NewStudentProfile {
        user_id,
        year_program: require_text("year_program", &input.year_program)?,
        skills: input.skills.as_ref().map(|s| s.normalize()).unwrap_or_default(),
        interests: input
            .interests
            .as_ref()
            .map(|s| s.normalize())
            .unwrap_or_default(),
        weekly_hours: blank_to_none(input.weekly_hours.as_deref()),
        availability: blank_to_none(input.availability.as_deref()),
        irb_training_exp: parse_optional_date(
            "irb_training_exp",
            input.irb_training_exp.as_deref(),
        )?,
        cv_url: blank_to_none(input.cv_url.as_deref()),
        portfolio_url: blank_to_none(input.portfolio_url.as_deref()),
    };

    let profile = StudentProfileRepo::create(pool, &new)
        .await
        .map_err(classify_store_error)?;

    tracing::info!(user_id = %user_id, profile_id = %profile.id, "Student profile created");
    Ok(profile)
}
