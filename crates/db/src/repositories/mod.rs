//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async SQL methods. Methods
//! that only read take `&PgPool`; methods that the board layer also runs
//! inside a transaction take any `PgExecutor` (`&PgPool` or `&mut *tx`).

pub mod application_repo;
pub mod assignment_repo;
pub mod audit_event_repo;
pub mod milestone_repo;
pub mod profile_repo;
pub mod project_owner_repo;
pub mod project_repo;
pub mod resource_repo;
pub mod slot_repo;
pub mod specialty_repo;
pub mod user_repo;

pub use application_repo::SlotApplicationRepo;
pub use assignment_repo::SlotAssignmentRepo;
pub use audit_event_repo::AuditEventRepo;
pub use milestone_repo::ProjectMilestoneRepo;
pub use profile_repo::{ResearcherProfileRepo, StudentProfileRepo};
pub use project_owner_repo::ProjectOwnerRepo;
pub use project_repo::ProjectRepo;
pub use resource_repo::ProjectResourceRepo;
pub use slot_repo::ProjectSlotRepo;
pub use specialty_repo::SpecialtyRepo;
pub use user_repo::UserRepo;
