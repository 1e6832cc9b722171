pub mod health;
pub mod prompt_styles;
pub mod prompts;
pub mod scenarios;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /session                                         current session (GET), autosave (PUT)
/// /session/load/{id}                               load snapshot into session (POST)
/// /session/import                                  import scenario file (POST)
/// /session/export                                  download session as JSON (GET)
///
/// /scenarios                                       list, save snapshot
/// /scenarios/{id}                                  get, rename, delete
///
/// /prompt-styles                                   list, create
/// /prompt-styles/{id}                              get, update, delete
///
/// /prompts/generate                                assemble prompt text (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/session", session::router())
        .nest("/scenarios", scenarios::router())
        .nest("/prompt-styles", prompt_styles::router())
        .nest("/prompts", prompts::router())
}
