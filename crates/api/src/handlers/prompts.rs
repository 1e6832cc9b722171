//! Handler for prompt generation.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use report_engine_core::migration::{self, Normalized};
use report_engine_core::prompt::{assemble_prompt, PromptSelection};
use report_engine_core::prompt_style::{builtin_instruction, DEFAULT_INSTRUCTION};
use report_engine_db::repositories::PromptStyleRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /prompts/generate`.
#[derive(Debug, Deserialize)]
pub struct GeneratePromptRequest {
    pub style: Option<String>,
    /// Scenario content in either shape.
    #[serde(default)]
    pub scenario: Value,
    #[serde(default)]
    pub selection: PromptSelection,
}

#[derive(Debug, Serialize)]
pub struct GeneratedPrompt {
    pub prompt: String,
    /// Name of the style that was applied, `None` when the default
    /// instruction was used.
    pub style: Option<String>,
    pub warnings: Vec<String>,
}

/// Missing collections are treated as empty so a partial scenario still
/// produces a prompt.
fn normalize_lenient(mut doc: Value) -> AppResult<Normalized> {
    if doc.is_null() {
        doc = Value::Object(serde_json::Map::new());
    }
    if let Some(obj) = doc.as_object_mut() {
        for key in ["entities", "events"] {
            obj.entry(key).or_insert_with(|| Value::Array(Vec::new()));
        }
    }
    Ok(migration::normalize(&doc)?)
}

/// Look a style up in the library, then among the built-ins shipped with
/// the application, then fall back to the default instruction.
async fn resolve_style(state: &AppState, name: &str) -> AppResult<(Option<String>, String)> {
    if let Some(style) = PromptStyleRepo::find_by_name(&state.pool, name).await? {
        return Ok((Some(style.name), style.instruction));
    }
    Ok(match builtin_instruction(name) {
        Some(instruction) => (Some(name.to_string()), instruction.to_string()),
        None => (None, DEFAULT_INSTRUCTION.to_string()),
    })
}

/// POST /api/v1/prompts/generate
///
/// Unknown or absent style names fall back to the default instruction.
pub async fn generate_prompt(
    State(state): State<AppState>,
    Json(input): Json<GeneratePromptRequest>,
) -> AppResult<impl IntoResponse> {
    let normalized = normalize_lenient(input.scenario)?;

    let requested = input.style.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let (style, instruction) = match requested {
        Some(name) => resolve_style(&state, name).await?,
        None => (None, DEFAULT_INSTRUCTION.to_string()),
    };

    let prompt = assemble_prompt(&instruction, &normalized.content, &input.selection);

    tracing::debug!(
        style = style.as_deref(),
        requested,
        length = prompt.len(),
        "Prompt generated",
    );

    Ok(Json(DataResponse {
        data: GeneratedPrompt {
            prompt,
            style,
            warnings: normalized.warnings,
        },
    }))
}
