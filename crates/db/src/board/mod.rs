//! Board operations.
//!
//! These are the entry points callers use: they validate and normalize raw
//! input, compose repository calls (inside a transaction where several rows
//! must change together), append audit events, and classify every store
//! failure into a [`CoreError`](sirn_core::error::CoreError).
//!
//! The board never retries. Only the specialty listing degrades on an
//! unreachable store, returning an empty listing; every write surfaces its
//! error.

pub mod audit;
pub mod content;
pub mod people;
pub mod projects;
pub mod slots;
pub mod specialties;

pub use audit::list_audit_events;
pub use content::{add_resource, create_milestone, update_milestone};
pub use people::{
    create_researcher_profile, create_student_profile, create_user, get_user, resolve_caller,
};
pub use projects::{
    add_project_owner, can_view_assignees, create_project, delete_project, get_project,
    get_project_detail, list_active_projects, list_active_projects_by_slug, list_project_owners,
    set_project_progress, set_project_status, update_project,
};
pub use slots::{
    accept_application, apply_to_slot, close_slot, create_slot, list_applications,
    reject_application, withdraw_application,
};
pub use specialties::{
    create_specialty, delete_specialty, get_specialty_by_slug, list_active_specialties_with_counts,
};
