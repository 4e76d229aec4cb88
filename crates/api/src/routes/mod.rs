pub mod dossier_status;
pub mod health;
pub mod trash;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dossier-statuses                      list (auth required)
/// /dossier-statuses/{code}               describe one status
/// /dossier-statuses/{code}/timeline      main-path timeline
///
/// /trash                                 list (scoped), record deletion (POST)
/// /trash/{id}                            get (scoped), purge (DELETE, admin)
/// /trash/purge-preview                   preview expired entries (admin)
/// /trash/purge                           purge expired entries (POST, admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/dossier-statuses", dossier_status::router())
        .nest("/trash", trash::router())
}
