//! Route definitions for the `/dossier-statuses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dossier_status;
use crate::state::AppState;

/// Routes mounted at `/dossier-statuses`.
///
/// ```text
/// GET /                  -> list_statuses
/// GET /{code}            -> get_status
/// GET /{code}/timeline   -> get_timeline
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dossier_status::list_statuses))
        .route("/{code}", get(dossier_status::get_status))
        .route("/{code}/timeline", get(dossier_status::get_timeline))
}
