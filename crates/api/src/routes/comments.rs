//! Mounted at `/comments` by `api_routes()`.

use axum::routing::delete;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// ```text
/// DELETE /{id}               -> delete_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(comments::delete_comment))
}
