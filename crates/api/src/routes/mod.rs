pub mod articles;
pub mod comments;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /articles                                        list, create (create requires auth)
/// /articles/{id}                                   get, update, delete (writes: author only)
/// /articles/{id}/comments                          list, create (create requires auth)
///
/// /comments/{id}                                   delete (comment author only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/articles", articles::router())
        .nest("/comments", comments::router())
}
