//! Scenario models and DTOs.
//!
//! One table holds both the autosave session (`is_autosave = true`, at most
//! one row) and named snapshots.

use report_engine_core::scenario::ScenarioContent;
use report_engine_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `scenarios` table.
///
/// `content` is kept as raw JSON: rows written before the id-keyed format
/// still decode and are normalized by the caller.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scenario {
    pub id: DbId,
    pub name: String,
    pub content: serde_json::Value,
    pub is_autosave: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight listing row for named snapshots.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScenarioSummary {
    pub id: DbId,
    pub name: String,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a named snapshot.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateScenario {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub content: ScenarioContent,
}

/// DTO for renaming a named snapshot.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateScenario {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
}
