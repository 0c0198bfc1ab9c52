//! Status and type enumerations for projects, slots, applications,
//! milestones and resources.
//!
//! Each enum's values match the `ck_*` check constraints in the migrations.

text_enum! {
    /// Project lifecycle status. New projects start as `Draft`.
    ProjectStatus("project status") {
        Draft = "draft",
        Active = "active",
        Paused = "paused",
        Completed = "completed",
        Archived = "archived",
    }
}

text_enum! {
    /// Institutional Review Board approval state.
    IrbStatus("IRB status") {
        Approved = "approved",
        Pending = "pending",
        Exempt = "exempt",
        NotNeeded = "not_needed",
    }
}

text_enum! {
    /// Slot status. `Assigned` iff a slot assignment row exists.
    SlotStatus("slot status") {
        Open = "open",
        Assigned = "assigned",
        Closed = "closed",
    }
}

text_enum! {
    /// Slot application status. Only `Submitted` applications can be decided.
    ApplicationStatus("application status") {
        Submitted = "submitted",
        Accepted = "accepted",
        Rejected = "rejected",
        Withdrawn = "withdrawn",
    }
}

text_enum! {
    MilestoneStatus("milestone status") {
        Todo = "todo",
        InProgress = "in_progress",
        Done = "done",
    }
}

text_enum! {
    /// Kind of reference link attached to a project.
    ResourceType("resource type") {
        Protocol = "protocol",
        Sop = "sop",
        Drive = "drive",
        Redcap = "redcap",
        Publication = "publication",
        Other = "other",
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Draft
    }
}

impl Default for IrbStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl ApplicationStatus {
    /// Whether the application still awaits a decision.
    pub fn is_pending(self) -> bool {
        self == Self::Submitted
    }
}
