pub mod admin;
pub mod apartment;
pub mod health;
pub mod partner;
pub mod project;

use axum::routing::get;
use axum::Router;

use crate::handlers::translation;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /languages                                       default + supported codes (GET)
///
/// /partners                                        list, create
/// /partners/{id}                                   get, update, delete
/// /partners/{id}/translations/{language}           set content (PUT)
/// /partners/{id}/translations/sync                 backfill (POST)
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/translations/{language}           set content (PUT)
/// /projects/{id}/translations/sync                 backfill (POST)
///
/// /apartments                                      list, create
/// /apartments/{id}                                 get, update, delete
///
/// /admin/translations/sync                         backfill everything (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/languages", get(translation::list_languages))
        .nest("/partners", partner::router())
        .nest("/projects", project::router())
        .nest("/apartments", apartment::router())
        .nest("/admin", admin::router())
}
