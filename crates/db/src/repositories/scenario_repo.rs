//! Repository for the `scenarios` table.
//!
//! The autosave session is written with `INSERT ... ON CONFLICT` against the
//! partial unique index `uq_scenarios_single_autosave`, so concurrent ticks
//! can never create a second session row. Last write wins.

use report_engine_core::scenario::ScenarioContent;
use report_engine_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::scenario::{CreateScenario, Scenario, ScenarioSummary};

/// Column list for `scenarios` queries.
const COLUMNS: &str = "id, name, content, is_autosave, created_at, updated_at";

/// Provides data access for the autosave session and named snapshots.
pub struct ScenarioRepo;

impl ScenarioRepo {
    /// Find any scenario row (session or snapshot) by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Scenario>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenarios WHERE id = $1");
        sqlx::query_as::<_, Scenario>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Autosave session
    // -----------------------------------------------------------------------

    /// Return the current autosave session, if one exists.
    pub async fn find_autosave(pool: &PgPool) -> Result<Option<Scenario>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenarios WHERE is_autosave");
        sqlx::query_as::<_, Scenario>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the session content, keeping the session's current name.
    ///
    /// Creates the session named `default_name` if none exists yet.
    pub async fn save_autosave(
        pool: &PgPool,
        content: &ScenarioContent,
        default_name: &str,
    ) -> Result<Scenario, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenarios (name, content, is_autosave) \
             VALUES ($1, $2, TRUE) \
             ON CONFLICT (is_autosave) WHERE is_autosave DO UPDATE SET \
                 content = EXCLUDED.content \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scenario>(&query)
            .bind(default_name)
            .bind(Json(content))
            .fetch_one(pool)
            .await
    }

    /// Overwrite both name and content of the session (or create it).
    pub async fn replace_autosave(
        pool: &PgPool,
        name: &str,
        content: &ScenarioContent,
    ) -> Result<Scenario, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenarios (name, content, is_autosave) \
             VALUES ($1, $2, TRUE) \
             ON CONFLICT (is_autosave) WHERE is_autosave DO UPDATE SET \
                 name = EXCLUDED.name, \
                 content = EXCLUDED.content \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scenario>(&query)
            .bind(name)
            .bind(Json(content))
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Named snapshots
    // -----------------------------------------------------------------------

    /// Insert a new named snapshot.
    pub async fn create_snapshot(
        pool: &PgPool,
        dto: &CreateScenario,
    ) -> Result<Scenario, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenarios (name, content, is_autosave) \
             VALUES ($1, $2, FALSE) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scenario>(&query)
            .bind(&dto.name)
            .bind(Json(&dto.content))
            .fetch_one(pool)
            .await
    }

    /// List all named snapshots, most recently updated first.
    pub async fn list_snapshots(pool: &PgPool) -> Result<Vec<ScenarioSummary>, sqlx::Error> {
        sqlx::query_as::<_, ScenarioSummary>(
            "SELECT id, name, updated_at FROM scenarios \
             WHERE NOT is_autosave \
             ORDER BY updated_at DESC, id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Rename a snapshot. Returns `None` if no snapshot has this ID.
    pub async fn rename_snapshot(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Scenario>, sqlx::Error> {
        let query = format!(
            "UPDATE scenarios SET name = $2 \
             WHERE id = $1 AND NOT is_autosave \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scenario>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a snapshot by ID. The autosave session is never deleted.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_snapshot(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scenarios WHERE id = $1 AND NOT is_autosave")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
