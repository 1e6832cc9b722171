//! Display names and timestamp formats for sessions and snapshots.

use crate::types::Timestamp;

/// Name shown when no autosave session exists yet.
pub const DEFAULT_SESSION_NAME: &str = "New Scenario";

/// Prefix of a session that was loaded from a named snapshot.
pub const EDITING_PREFIX: &str = "Editing: ";

pub const IMPORTED_PREFIX: &str = "Imported: ";

/// Name given to a freshly created autosave session.
pub fn autosave_session_name(now: Timestamp) -> String {
    format!("Auto-save @ {}", now.format("%b %d, %H:%M"))
}

pub fn editing_session_name(snapshot_name: &str) -> String {
    format!("{EDITING_PREFIX}{snapshot_name}")
}

pub fn imported_session_name(file_name: &str) -> String {
    format!("{IMPORTED_PREFIX}{file_name}")
}

/// Human-readable last-updated stamp used in snapshot listings.
pub fn format_last_updated(ts: Timestamp) -> String {
    ts.format("%b %d, %Y %H:%M UTC").to_string()
}

/// Download file name for an exported scenario.
pub fn export_file_name(now: Timestamp) -> String {
    format!(
        "report-engine-scenario-{}.json",
        now.format("%Y-%m-%dT%H-%M-%S")
    )
}
