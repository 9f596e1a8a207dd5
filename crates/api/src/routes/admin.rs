use axum::routing::post;
use axum::Router;

use crate::handlers::translation;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /translations/sync                 -> sync_all
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/translations/sync", post(translation::sync_all))
}
