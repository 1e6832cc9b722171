//! Repository for the `prompt_styles` table.

use report_engine_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt_style::{CreatePromptStyle, PromptStyle, UpdatePromptStyle};

/// Column list for `prompt_styles` queries.
const COLUMNS: &str = "id, name, instruction, is_deletable, created_at, updated_at";

/// Provides CRUD operations for prompt styles.
pub struct PromptStyleRepo;

impl PromptStyleRepo {
    /// List all styles, built-ins first, then by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<PromptStyle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_styles ORDER BY is_deletable, name"
        );
        sqlx::query_as::<_, PromptStyle>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PromptStyle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompt_styles WHERE id = $1");
        sqlx::query_as::<_, PromptStyle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<PromptStyle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompt_styles WHERE name = $1");
        sqlx::query_as::<_, PromptStyle>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Create a user-defined (deletable) style.
    ///
    /// A duplicate name fails with the `uq_prompt_styles_name` violation.
    pub async fn create(
        pool: &PgPool,
        dto: &CreatePromptStyle,
    ) -> Result<PromptStyle, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompt_styles (name, instruction, is_deletable) \
             VALUES ($1, $2, TRUE) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptStyle>(&query)
            .bind(&dto.name)
            .bind(&dto.instruction)
            .fetch_one(pool)
            .await
    }

    /// Partially update a style.
    ///
    /// Uses `COALESCE` so only provided fields are changed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdatePromptStyle,
    ) -> Result<Option<PromptStyle>, sqlx::Error> {
        let query = format!(
            "UPDATE prompt_styles SET \
                 name = COALESCE($2, name), \
                 instruction = COALESCE($3, instruction) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptStyle>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.instruction)
            .fetch_optional(pool)
            .await
    }

    /// Delete a user-defined style. Built-in styles are left untouched.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompt_styles WHERE id = $1 AND is_deletable")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
