//! Researcher and student profile models and DTOs.
//!
//! Both profile kinds extend a [`User`](super::user::User) and are deleted
//! with it.

use serde::{Deserialize, Serialize};
use sirn_core::normalize::ListInput;
use sirn_core::roles::ResearcherPosition;
use sirn_core::types::{Date, DbId};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Researcher profile
// ---------------------------------------------------------------------------

/// A row from the `researcher_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResearcherProfile {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(try_from = "String")]
    pub position: ResearcherPosition,
    pub specialty: String,
    pub department: Option<String>,
    pub institution: Option<String>,
    pub irb_training_exp: Option<Date>,
    pub mentorship_focus: Option<String>,
    pub biosketch_url: Option<String>,
}

/// DTO for creating a researcher profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResearcherProfile {
    pub position: String,
    pub specialty: String,
    pub department: Option<String>,
    /// Defaults to `UM/JMH` when blank or omitted.
    pub institution: Option<String>,
    pub irb_training_exp: Option<String>,
    pub mentorship_focus: Option<String>,
    pub biosketch_url: Option<String>,
}

/// Validated researcher profile insert.
#[derive(Debug, Clone)]
pub struct NewResearcherProfile {
    pub user_id: DbId,
    pub position: ResearcherPosition,
    pub specialty: String,
    pub department: Option<String>,
    pub institution: Option<String>,
    pub irb_training_exp: Option<Date>,
    pub mentorship_focus: Option<String>,
    pub biosketch_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Student profile
// ---------------------------------------------------------------------------

/// A row from the `student_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentProfile {
    pub id: DbId,
    pub user_id: DbId,
    pub year_program: String,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub weekly_hours: Option<String>,
    pub availability: Option<String>,
    pub irb_training_exp: Option<Date>,
    pub cv_url: Option<String>,
    pub portfolio_url: Option<String>,
}

/// DTO for creating a student profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentProfile {
    pub year_program: String,
    pub skills: Option<ListInput>,
    pub interests: Option<ListInput>,
    pub weekly_hours: Option<String>,
    pub availability: Option<String>,
    pub irb_training_exp: Option<String>,
    pub cv_url: Option<String>,
    pub portfolio_url: Option<String>,
}

/// Validated student profile insert.
#[derive(Debug, Clone)]
pub struct NewStudentProfile {
    pub user_id: DbId,
    pub year_program: String,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub weekly_hours: Option<String>,
    pub availability: Option<String>,
    pub irb_training_exp: Option<Date>,
    pub cv_url: Option<String>,
    pub portfolio_url: Option<String>,
}
