//! Handlers for the autosave editing session.
//!
//! There is exactly one session row at most. Every autosave tick overwrites
//! it; loading a snapshot or importing a file replaces it under a new name.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use report_engine_core::migration;
use report_engine_core::naming;
use report_engine_core::scenario::ScenarioContent;
use report_engine_core::types::{DbId, Timestamp};
use report_engine_db::models::scenario::Scenario;
use report_engine_db::repositories::ScenarioRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::scenarios::{ensure_scenario_exists, stored_content};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// The current session. `id`, `content` and `updated_at` are `None` when no
/// session has been started yet.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Option<DbId>,
    pub name: String,
    pub content: Option<ScenarioContent>,
    pub updated_at: Option<Timestamp>,
}

impl SessionView {
    fn empty() -> Self {
        Self {
            id: None,
            name: naming::DEFAULT_SESSION_NAME.to_string(),
            content: None,
            updated_at: None,
        }
    }

    fn from_row(row: Scenario) -> AppResult<Self> {
        let content = stored_content(&row)?;
        Ok(Self {
            id: Some(row.id),
            name: row.name,
            content: Some(content),
            updated_at: Some(row.updated_at),
        })
    }
}

/// Acknowledgement of an autosave tick.
#[derive(Debug, Serialize)]
pub struct AutosaveResult {
    pub id: DbId,
    pub name: String,
    pub updated_at: Timestamp,
    pub warnings: Vec<String>,
}

/// Body of `POST /session/import`: the raw file contents and its name.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub file_name: String,
    pub document: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub session: SessionView,
    pub source_version: u32,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/session
pub async fn get_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let view = match ScenarioRepo::find_autosave(&state.pool).await? {
        Some(row) => SessionView::from_row(row)?,
        None => SessionView::empty(),
    };
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/session
///
/// Autosave tick. The body is the whole scenario in either shape. The
/// session keeps its current name; a new one is named after the time.
pub async fn autosave(
    State(state): State<AppState>,
    Json(doc): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let normalized = migration::normalize(&doc)?;
    let default_name = naming::autosave_session_name(Utc::now());
    let row = ScenarioRepo::save_autosave(&state.pool, &normalized.content, &default_name).await?;

    tracing::debug!(
        scenario_id = row.id,
        entities = normalized.content.entities.len(),
        events = normalized.content.events.len(),
        "Autosave stored",
    );

    Ok(Json(DataResponse {
        data: AutosaveResult {
            id: row.id,
            name: row.name,
            updated_at: row.updated_at,
            warnings: normalized.warnings,
        },
    }))
}

/// POST /api/v1/session/load/{id}
///
/// Copy a snapshot into the session, named `Editing: {snapshot}`.
pub async fn load_snapshot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let snapshot = ensure_scenario_exists(&state.pool, id).await?;
    if snapshot.is_autosave {
        return Err(AppError::BadRequest(format!(
            "Scenario {id} is the autosave session and cannot be loaded into itself"
        )));
    }

    let content = stored_content(&snapshot)?;
    let name = naming::editing_session_name(&snapshot.name);
    let row = ScenarioRepo::replace_autosave(&state.pool, &name, &content).await?;

    tracing::info!(scenario_id = id, session_id = row.id, "Snapshot loaded into session");
    Ok(Json(DataResponse {
        data: SessionView::from_row(row)?,
    }))
}

/// POST /api/v1/session/import
///
/// Replace the session with an uploaded scenario file. Unresolvable
/// references are dropped and reported as warnings.
pub async fn import_scenario(
    State(state): State<AppState>,
    Json(input): Json<ImportRequest>,
) -> AppResult<impl IntoResponse> {
    let file_name = input.file_name.trim();
    if file_name.is_empty() {
        return Err(AppError::BadRequest("file_name must not be empty".to_string()));
    }

    let normalized = migration::normalize(&input.document)?;
    let name = naming::imported_session_name(file_name);
    let row = ScenarioRepo::replace_autosave(&state.pool, &name, &normalized.content).await?;

    tracing::info!(
        session_id = row.id,
        file_name,
        source_version = normalized.source_version,
        warnings = normalized.warnings.len(),
        "Scenario imported into session",
    );

    Ok(Json(DataResponse {
        data: ImportResult {
            session: SessionView::from_row(row)?,
            source_version: normalized.source_version,
            warnings: normalized.warnings,
        },
    }))
}

/// GET /api/v1/session/export
///
/// Download the session content as a pretty-printed JSON attachment. An
/// empty scenario is exported when no session exists.
pub async fn export_session(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let content = match ScenarioRepo::find_autosave(&state.pool).await? {
        Some(row) => stored_content(&row)?,
        None => ScenarioContent::default(),
    };
    let body = serde_json::to_string_pretty(&content)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize scenario: {e}")))?;
    let file_name = naming::export_file_name(Utc::now());

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}
