//! Handlers for article CRUD.
//!
//! Reads are public. Writes require a token, and only the author may
//! update or delete an article.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use scribe_core::article::{
    generate_slug, validate_body, validate_expertise_level, validate_image_url, validate_tags,
    validate_title,
};
use scribe_core::error::CoreError;
use scribe_core::paging::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use scribe_core::types::DbId;
use scribe_comments::ArticleStore;
use scribe_db::models::article::{Article, CreateArticle, NewArticle, UpdateArticle};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an article or fail with 404.
pub(crate) async fn load_article(state: &AppState, id: DbId) -> AppResult<Article> {
    state
        .store
        .find_article(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))
}

/// Load an article and check that `user` wrote it.
async fn load_owned_article(state: &AppState, id: DbId, user: &AuthUser) -> AppResult<Article> {
    let article = load_article(state, id).await?;
    if article.author_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can modify this article".into(),
        )));
    }
    Ok(article)
}

/// Trim every tag in place.
fn trim_tags(tags: &[String]) -> Vec<String> {
    tags.iter().map(|t| t.trim().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /articles?limit=&offset=
///
/// Newest first.
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);

    let articles = state.store.list_articles(limit, offset).await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /articles/{id}
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let article = load_article(&state, id).await?;
    Ok(Json(DataResponse { data: article }))
}

/// POST /articles
///
/// The authenticated user becomes the author.
pub async fn create_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    let image = input.image.unwrap_or_default();
    let tags = trim_tags(&input.tags);

    validate_title(&input.title)?;
    validate_expertise_level(&input.expertise_level)?;
    validate_tags(&tags)?;
    validate_body(&input.body)?;
    validate_image_url(image.trim())?;

    let title = input.title.trim().to_string();
    let new_article = NewArticle {
        author_id: auth.user_id,
        slug: generate_slug(&title),
        title,
        short_description: input.short_description.unwrap_or_default().trim().to_string(),
        body: input.body,
        image: image.trim().to_string(),
        expertise_level: input.expertise_level.trim().to_string(),
        tags,
    };

    let article = state.store.create_article(new_article).await?;

    tracing::info!(
        article_id = article.id,
        author_id = auth.user_id,
        slug = %article.slug,
        "Article created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// PUT /articles/{id}
///
/// Only fields present in the body change. A new title gets a new slug.
pub async fn update_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateArticle>,
) -> AppResult<impl IntoResponse> {
    load_owned_article(&state, id, &auth).await?;

    if let Some(title) = input.title.as_mut() {
        validate_title(title)?;
        *title = title.trim().to_string();
    }
    if let Some(level) = input.expertise_level.as_mut() {
        validate_expertise_level(level)?;
        *level = level.trim().to_string();
    }
    if let Some(tags) = input.tags.as_mut() {
        *tags = trim_tags(tags);
        validate_tags(tags)?;
    }
    if let Some(body) = input.body.as_ref() {
        validate_body(body)?;
    }
    if let Some(image) = input.image.as_mut() {
        *image = image.trim().to_string();
        validate_image_url(image)?;
    }
    if let Some(short_description) = input.short_description.as_mut() {
        *short_description = short_description.trim().to_string();
    }

    let slug = input.title.as_deref().map(generate_slug);

    let article = state
        .store
        .update_article(id, &input, slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;

    tracing::info!(article_id = id, author_id = auth.user_id, "Article updated");

    Ok(Json(DataResponse { data: article }))
}

/// DELETE /articles/{id}
///
/// Comments on the article go with it.
pub async fn delete_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_owned_article(&state, id, &auth).await?;

    let deleted = state.store.delete_article(id).await?;
    if deleted {
        tracing::info!(article_id = id, author_id = auth.user_id, "Article deleted");
    }

    Ok(StatusCode::NO_CONTENT)
}
