//! Route definitions for the prompt style library.

use axum::routing::get;
use axum::Router;

use crate::handlers::prompt_styles;
use crate::state::AppState;

/// Prompt style routes mounted at `/prompt-styles`.
///
/// ```text
/// GET    /       -> list_styles
/// POST   /       -> create_style
/// GET    /{id}   -> get_style
/// PUT    /{id}   -> update_style
/// DELETE /{id}   -> delete_style
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(prompt_styles::list_styles).post(prompt_styles::create_style),
        )
        .route(
            "/{id}",
            get(prompt_styles::get_style)
                .put(prompt_styles::update_style)
                .delete(prompt_styles::delete_style),
        )
}
