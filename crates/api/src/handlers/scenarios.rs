//! Handlers for named scenario snapshots.
//!
//! Snapshots are immutable copies of a scenario saved under a name. They can
//! be listed, renamed, deleted, and loaded back into the editing session
//! (see [`super::session::load_snapshot`]).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use report_engine_core::error::CoreError;
use report_engine_core::migration;
use report_engine_core::naming;
use report_engine_core::scenario::ScenarioContent;
use report_engine_core::types::{DbId, Timestamp};
use report_engine_db::models::scenario::{CreateScenario, Scenario, UpdateScenario};
use report_engine_db::repositories::ScenarioRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Error message for a save request lacking a name or content.
pub const MISSING_NAME_OR_CONTENT: &str = "Missing name or content";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `POST /scenarios`. Both fields are required; they are optional
/// here so a missing field yields a 400 with a clear message instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SaveSnapshotRequest {
    pub name: Option<String>,
    pub content: Option<serde_json::Value>,
}

/// A scenario row with its content decoded into the canonical shape.
#[derive(Debug, Serialize)]
pub struct ScenarioView {
    pub id: DbId,
    pub name: String,
    pub content: ScenarioContent,
    pub is_autosave: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ScenarioView {
    pub fn from_row(row: Scenario) -> AppResult<Self> {
        let content = stored_content(&row)?;
        Ok(Self {
            id: row.id,
            name: row.name,
            content,
            is_autosave: row.is_autosave,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// One entry of the snapshot listing.
#[derive(Debug, Serialize)]
pub struct SnapshotListItem {
    pub id: DbId,
    pub name: String,
    /// Display form, e.g. `Mar 07, 2026 09:05 UTC`.
    pub last_updated: String,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Decode a stored row's content, upgrading rows written in the old
/// name-keyed shape.
pub(crate) fn stored_content(row: &Scenario) -> AppResult<ScenarioContent> {
    migration::normalize(&row.content)
        .map(|n| n.content)
        .map_err(|e| {
            AppError::InternalError(format!("Stored scenario {} is unreadable: {e}", row.id))
        })
}

/// `null`, `{}`, `[]` and `""` count as missing content.
fn is_blank(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Verify that a scenario row exists, returning it.
pub(crate) async fn ensure_scenario_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Scenario> {
    ScenarioRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Scenario",
            id,
        })
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/scenarios
///
/// List all named snapshots, most recent first.
pub async fn list_snapshots(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items: Vec<SnapshotListItem> = ScenarioRepo::list_snapshots(&state.pool)
        .await?
        .into_iter()
        .map(|s| SnapshotListItem {
            id: s.id,
            name: s.name,
            last_updated: naming::format_last_updated(s.updated_at),
            updated_at: s.updated_at,
        })
        .collect();
    tracing::debug!(count = items.len(), "Listed scenario snapshots");
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/scenarios
///
/// Save the given content as a new named snapshot. Content may be in
/// either historical shape; it is stored canonical.
pub async fn save_snapshot(
    State(state): State<AppState>,
    Json(input): Json<SaveSnapshotRequest>,
) -> AppResult<impl IntoResponse> {
    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    let doc = input.content.filter(|c| !is_blank(c));
    let (Some(name), Some(doc)) = (name, doc) else {
        return Err(AppError::BadRequest(MISSING_NAME_OR_CONTENT.to_string()));
    };

    let normalized = migration::normalize(&doc)?;
    let dto = CreateScenario {
        name: name.to_string(),
        content: normalized.content,
    };
    dto.validate()?;

    let created = ScenarioRepo::create_snapshot(&state.pool, &dto).await?;
    tracing::info!(
        scenario_id = created.id,
        name = %created.name,
        warnings = normalized.warnings.len(),
        "Scenario snapshot saved",
    );

    let view = ScenarioView::from_row(created)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /api/v1/scenarios/{id}
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = ensure_scenario_exists(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ScenarioView::from_row(row)?,
    }))
}

/// PUT /api/v1/scenarios/{id}
///
/// Rename a snapshot. The autosave session cannot be renamed here; its
/// name follows from how it was started.
pub async fn rename_snapshot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateScenario>,
) -> AppResult<impl IntoResponse> {
    input.name = input.name.trim().to_string();
    input.validate()?;
    let row = ensure_scenario_exists(&state.pool, id).await?;
    if row.is_autosave {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot rename autosave session".to_string(),
        )));
    }

    let renamed = ScenarioRepo::rename_snapshot(&state.pool, id, &input.name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scenario",
            id,
        }))?;

    tracing::info!(scenario_id = id, name = %renamed.name, "Scenario snapshot renamed");
    Ok(Json(DataResponse {
        data: ScenarioView::from_row(renamed)?,
    }))
}

/// DELETE /api/v1/scenarios/{id}
///
/// Delete a snapshot. The autosave session is protected (403).
pub async fn delete_snapshot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = ensure_scenario_exists(&state.pool, id).await?;
    if row.is_autosave {
        return Err(AppError::Core(CoreError::Forbidden(
            "Cannot delete autosave session".to_string(),
        )));
    }

    let deleted = ScenarioRepo::delete_snapshot(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Scenario",
            id,
        }));
    }

    tracing::info!(scenario_id = id, "Scenario snapshot deleted");
    Ok(StatusCode::NO_CONTENT)
}
