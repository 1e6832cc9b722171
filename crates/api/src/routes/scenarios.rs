//! Route definitions for named scenario snapshots.

use axum::routing::get;
use axum::Router;

use crate::handlers::scenarios;
use crate::state::AppState;

/// Snapshot routes mounted at `/scenarios`.
///
/// ```text
/// GET    /       -> list_snapshots
/// POST   /       -> save_snapshot
/// GET    /{id}   -> get_snapshot
/// PUT    /{id}   -> rename_snapshot
/// DELETE /{id}   -> delete_snapshot
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(scenarios::list_snapshots).post(scenarios::save_snapshot),
        )
        .route(
            "/{id}",
            get(scenarios::get_snapshot)
                .put(scenarios::rename_snapshot)
                .delete(scenarios::delete_snapshot),
        )
}
