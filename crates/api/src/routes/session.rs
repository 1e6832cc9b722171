//! Route definitions for the autosave editing session.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Session routes mounted at `/session`.
///
/// ```text
/// GET  /            -> get_session
/// PUT  /            -> autosave
/// POST /load/{id}   -> load_snapshot
/// POST /import      -> import_scenario
/// GET  /export      -> export_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(session::get_session).put(session::autosave))
        .route("/load/{id}", post(session::load_snapshot))
        .route("/import", post(session::import_scenario))
        .route("/export", get(session::export_session))
}
