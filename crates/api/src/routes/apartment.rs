//! Route definitions for the `/apartments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::apartment;
use crate::state::AppState;

/// Routes mounted at `/apartments`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(apartment::list).post(apartment::create))
        .route(
            "/{id}",
            get(apartment::get_by_id)
                .put(apartment::update)
                .delete(apartment::delete),
        )
}
