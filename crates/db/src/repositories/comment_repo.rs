//! Repository for the `comments` table.
//!
//! Reads always join `users` so callers get the author summary, never a
//! bare `user_id`.

use sqlx::PgPool;
use scribe_core::types::DbId;

use crate::models::comment::{Comment, CommentAuthorRow, CommentFilter, CommentWithAuthor};

/// Column list for plain comments queries.
const COLUMNS: &str = "id, text, user_id, article_id, created_at, updated_at";

/// Column list for the author-joined projection.
const JOINED_COLUMNS: &str = "c.id, c.text, c.article_id, c.user_id, \
    u.username, u.fullname, u.photo, c.created_at, c.updated_at";

/// Provides insert/delete/count and author-joined reads for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment, returning the created row.
    ///
    /// `text` must already be trimmed and validated.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        article_id: DbId,
        text: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (text, user_id, article_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(text)
            .bind(user_id)
            .bind(article_id)
            .fetch_one(pool)
            .await
    }

    /// Delete a comment and return the removed row, or `None` if it did not exist.
    pub async fn find_and_delete(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("DELETE FROM comments WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count the comments that belong to an article.
    pub async fn count_for_article(pool: &PgPool, article_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE article_id = $1")
            .bind(article_id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// List comments matching a filter, oldest first, with authors resolved.
    pub async fn find_many(
        pool: &PgPool,
        filter: &CommentFilter,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM comments c
             INNER JOIN users u ON u.id = c.user_id
             WHERE ($1::BIGINT IS NULL OR c.id = $1)
               AND ($2::BIGINT IS NULL OR c.article_id = $2)
               AND ($3::BIGINT IS NULL OR c.user_id = $3)
             ORDER BY c.created_at ASC, c.id ASC"
        );
        let rows = sqlx::query_as::<_, CommentAuthorRow>(&query)
            .bind(filter.id)
            .bind(filter.article_id)
            .bind(filter.user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CommentWithAuthor::from).collect())
    }

    /// Return the first comment matching a filter, with its author resolved.
    pub async fn find_one(
        pool: &PgPool,
        filter: &CommentFilter,
    ) -> Result<Option<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM comments c
             INNER JOIN users u ON u.id = c.user_id
             WHERE ($1::BIGINT IS NULL OR c.id = $1)
               AND ($2::BIGINT IS NULL OR c.article_id = $2)
               AND ($3::BIGINT IS NULL OR c.user_id = $3)
             ORDER BY c.created_at ASC, c.id ASC
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, CommentAuthorRow>(&query)
            .bind(filter.id)
            .bind(filter.article_id)
            .bind(filter.user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(CommentWithAuthor::from))
    }
}
