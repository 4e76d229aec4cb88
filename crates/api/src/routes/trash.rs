//! Route definitions for the `/trash` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::trash;
use crate::state::AppState;

/// Routes mounted at `/trash`.
///
/// ```text
/// GET    /                -> list_entries   (?item_type=&deleted_by=&original_owner=
///                                            &deleted_after=&deleted_before=&limit=&offset=)
/// POST   /                -> record_deletion
/// GET    /purge-preview   -> purge_preview  (?days=)
/// POST   /purge           -> purge_expired  (?days=)
/// GET    /{id}            -> get_entry
/// DELETE /{id}            -> purge_one
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(trash::list_entries).post(trash::record_deletion))
        .route("/purge-preview", get(trash::purge_preview))
        .route("/purge", post(trash::purge_expired))
        .route("/{id}", get(trash::get_entry).delete(trash::purge_one))
}
