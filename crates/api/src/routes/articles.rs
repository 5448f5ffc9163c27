//! Route definitions for articles and their comments.
//!
//! Mounted at `/articles` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{articles, comments};
use crate::state::AppState;

/// Article routes.
///
/// ```text
/// GET    /                   -> list_articles (?limit, offset)
/// POST   /                   -> create_article
/// GET    /{id}               -> get_article
/// PUT    /{id}               -> update_article
/// DELETE /{id}               -> delete_article
/// GET    /{id}/comments      -> list_comments
/// POST   /{id}/comments      -> create_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
}
