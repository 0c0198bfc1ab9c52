//! Repositories for the `researcher_profiles` and `student_profiles` tables.

use sirn_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{
    NewResearcherProfile, NewStudentProfile, ResearcherProfile, StudentProfile,
};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

const RESEARCHER_COLUMNS: &str = "\
    id, user_id, position, specialty, department, institution, \
    irb_training_exp, mentorship_focus, biosketch_url";

const STUDENT_COLUMNS: &str = "\
    id, user_id, year_program, skills, interests, weekly_hours, \
    availability, irb_training_exp, cv_url, portfolio_url";

// ---------------------------------------------------------------------------
// ResearcherProfileRepo
// ---------------------------------------------------------------------------

pub struct ResearcherProfileRepo;

impl ResearcherProfileRepo {
    /// Insert a researcher profile. A `NULL` institution falls back to `UM/JMH`.
    pub async fn create(
        pool: &PgPool,
        input: &NewResearcherProfile,
    ) -> Result<ResearcherProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO researcher_profiles
                (user_id, position, specialty, department, institution,
                 irb_training_exp, mentorship_focus, biosketch_url)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'UM/JMH'), $6, $7, $8)
             RETURNING {RESEARCHER_COLUMNS}"
        );
        sqlx::query_as::<_, ResearcherProfile>(&query)
            .bind(input.user_id)
            .bind(input.position.as_str())
            .bind(&input.specialty)
            .bind(&input.department)
            .bind(&input.institution)
            .bind(input.irb_training_exp)
            .bind(&input.mentorship_focus)
            .bind(&input.biosketch_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<ResearcherProfile>, sqlx::Error> {
        let query = format!("SELECT {RESEARCHER_COLUMNS} FROM researcher_profiles WHERE user_id = $1");
        sqlx::query_as::<_, ResearcherProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// StudentProfileRepo
// ---------------------------------------------------------------------------

pub struct StudentProfileRepo;

impl StudentProfileRepo {
    pub async fn create(
        pool: &PgPool,
        input: &NewStudentProfile,
    ) -> Result<StudentProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO student_profiles
                (user_id, year_program, skills, interests, weekly_hours,
                 availability, irb_training_exp, cv_url, portfolio_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {STUDENT_COLUMNS}"
        );
        sqlx::query_as::<_, StudentProfile>(&query)
            .bind(input.user_id)
            .bind(&input.year_program)
            .bind(&input.skills)
            .bind(&input.interests)
            .bind(&input.weekly_hours)
            .bind(&input.availability)
            .bind(input.irb_training_exp)
            .bind(&input.cv_url)
            .bind(&input.portfolio_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StudentProfile>, sqlx::Error> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM student_profiles WHERE id = $1");
        sqlx::query_as::<_, StudentProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<StudentProfile>, sqlx::Error> {
        let query = format!("SELECT {STUDENT_COLUMNS} FROM student_profiles WHERE user_id = $1");
        sqlx::query_as::<_, StudentProfile>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
