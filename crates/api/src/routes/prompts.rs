use axum::routing::post;
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Prompt generation routes mounted at `/prompts`.
///
/// ```text
/// POST /generate -> generate_prompt
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(prompts::generate_prompt))
}
