//! Route definitions for the `/partners` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::partner;
use crate::state::AppState;

/// Routes mounted at `/partners`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update
/// DELETE /{id}                              -> delete
/// PUT    /{id}/translations/{language}      -> upsert_translation
/// POST   /{id}/translations/sync            -> sync_translations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(partner::list).post(partner::create))
        .route(
            "/{id}",
            get(partner::get_by_id)
                .put(partner::update)
                .delete(partner::delete),
        )
        .route("/{id}/translations/sync", post(partner::sync_translations))
        .route(
            "/{id}/translations/{language}",
            put(partner::upsert_translation),
        )
}
