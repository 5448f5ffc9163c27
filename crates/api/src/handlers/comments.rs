//! Handlers for article comments.
//!
//! Every write goes through [`CommentService`](scribe_comments::CommentService)
//! so the article's `comment_counts` is recomputed afterwards.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_db::models::comment::{CommentFilter, CreateComment};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /articles/{id}/comments
///
/// Oldest first, each with its author resolved.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let comments = state.comments.list_for_article(article_id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /articles/{id}/comments
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<impl IntoResponse> {
    let comment = state
        .comments
        .create(&input.text, auth.user_id, article_id)
        .await?;

    // Re-read so the response carries the author summary like list does.
    let comment = state
        .comments
        .find_one(&CommentFilter::by_id(comment.id))
        .await?
        .ok_or_else(|| AppError::InternalError("Created comment vanished".into()))?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// DELETE /comments/{id}
///
/// Deleting a comment that is already gone succeeds.
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if let Some(existing) = state.comments.find_one(&CommentFilter::by_id(id)).await? {
        if existing.user.id != auth.user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Only the author can delete this comment".into(),
            )));
        }
    }

    state.comments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
