//! User roles, researcher positions and the caller identity.
//!
//! Role values must match the `ck_users_role` check constraint.

use serde::Serialize;

use crate::types::DbId;

text_enum! {
    /// Role fixed on a user at creation time.
    UserRole("role") {
        Admin = "admin",
        Owner = "owner",
        Student = "student",
    }
}

text_enum! {
    /// Academic position of a researcher or project owner.
    ResearcherPosition("position") {
        Attending = "attending",
        Fellow = "fellow",
        Resident = "resident",
        SeniorStudent = "senior_student",
    }
}

/// Pre-authenticated identity of whoever invoked a board operation.
///
/// Authentication happens upstream; the board only uses this to attribute
/// audit events and to decide assignee visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub user_id: DbId,
    pub role: UserRole,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
