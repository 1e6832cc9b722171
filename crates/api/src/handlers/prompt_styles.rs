//! Handlers for prompt styles.
//!
//! Built-in styles are seeded with `is_deletable = false`. Their
//! instruction may be edited but they can never be renamed or deleted.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use report_engine_core::error::CoreError;
use report_engine_core::prompt_style::{validate_instruction, validate_style_name};
use report_engine_core::types::DbId;
use report_engine_db::models::prompt_style::{CreatePromptStyle, PromptStyle, UpdatePromptStyle};
use report_engine_db::repositories::PromptStyleRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

async fn ensure_style_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<PromptStyle> {
    PromptStyleRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "PromptStyle",
            id,
        })
    })
}

/// GET /api/v1/prompt-styles
pub async fn list_styles(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let styles = PromptStyleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: styles }))
}

/// POST /api/v1/prompt-styles
pub async fn create_style(
    State(state): State<AppState>,
    Json(mut input): Json<CreatePromptStyle>,
) -> AppResult<impl IntoResponse> {
    input.name = input.name.trim().to_string();
    input.validate()?;
    validate_style_name(&input.name)?;
    validate_instruction(&input.instruction)?;

    let style = PromptStyleRepo::create(&state.pool, &input).await?;
    tracing::info!(style_id = style.id, name = %style.name, "Prompt style created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: style })))
}

/// GET /api/v1/prompt-styles/{id}
pub async fn get_style(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let style = ensure_style_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: style }))
}

/// PUT /api/v1/prompt-styles/{id}
pub async fn update_style(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdatePromptStyle>,
) -> AppResult<impl IntoResponse> {
    input.name = input.name.map(|n| n.trim().to_string());
    input.validate()?;
    if let Some(name) = &input.name {
        validate_style_name(name)?;
    }
    if let Some(instruction) = &input.instruction {
        validate_instruction(instruction)?;
    }

    let existing = ensure_style_exists(&state.pool, id).await?;
    let renames = input.name.as_deref().is_some_and(|n| n != existing.name);
    if !existing.is_deletable && renames {
        return Err(AppError::Core(CoreError::Forbidden(
            "Built-in prompt styles cannot be renamed".to_string(),
        )));
    }

    let style = PromptStyleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PromptStyle",
            id,
        }))?;

    tracing::info!(style_id = id, name = %style.name, "Prompt style updated");
    Ok(Json(DataResponse { data: style }))
}

/// DELETE /api/v1/prompt-styles/{id}
pub async fn delete_style(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_style_exists(&state.pool, id).await?;
    if !existing.is_deletable {
        return Err(AppError::Core(CoreError::Forbidden(
            "Built-in prompt styles cannot be deleted".to_string(),
        )));
    }

    if !PromptStyleRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PromptStyle",
            id,
        }));
    }

    tracing::info!(style_id = id, name = %existing.name, "Prompt style deleted");
    Ok(StatusCode::NO_CONTENT)
}
