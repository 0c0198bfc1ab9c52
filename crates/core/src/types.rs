/// All primary keys are PostgreSQL UUIDs generated by `gen_random_uuid()`.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (project start/target, milestone due dates).
pub type Date = chrono::NaiveDate;
