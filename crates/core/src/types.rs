/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier of an entity, location, or event inside a scenario document.
///
/// Member ids are strings scoped to one scenario, unlike [`DbId`].
pub type MemberId = String;
