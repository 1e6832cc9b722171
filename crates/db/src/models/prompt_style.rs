//! Prompt style models and DTOs.

use report_engine_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `prompt_styles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptStyle {
    pub id: DbId,
    pub name: String,
    pub instruction: String,
    /// `false` for the seeded built-in styles.
    pub is_deletable: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a user-defined prompt style.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePromptStyle {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 10000))]
    pub instruction: String,
}

/// DTO for partially updating a prompt style.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePromptStyle {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub instruction: Option<String>,
}
