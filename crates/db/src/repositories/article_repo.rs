//! Repository for the `articles` table.

use sqlx::PgPool;
use scribe_core::types::DbId;

use crate::models::article::{Article, NewArticle, UpdateArticle};

/// Column list for articles queries.
const COLUMNS: &str = "id, author_id, title, slug, short_description, body, image, \
    expertise_level, tags, comment_counts, created_at, updated_at";

/// Provides CRUD operations for articles and the comment-count write-back.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles
                (author_id, title, slug, short_description, body, image,
                 expertise_level, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(input.author_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.short_description)
            .bind(&input.body)
            .bind(&input.image)
            .bind(&input.expertise_level)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find an article by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List articles newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. `slug` is set when the title changed.
    ///
    /// Returns `None` if the article does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
        slug: Option<&str>,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                title = COALESCE($1, title),
                slug = COALESCE($2, slug),
                short_description = COALESCE($3, short_description),
                body = COALESCE($4, body),
                image = COALESCE($5, image),
                expertise_level = COALESCE($6, expertise_level),
                tags = COALESCE($7, tags),
                updated_at = now()
             WHERE id = $8
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.short_description)
            .bind(&input.body)
            .bind(&input.image)
            .bind(&input.expertise_level)
            .bind(&input.tags)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article. Its comments are removed by the FK cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the derived comment count.
    ///
    /// Touches only `comment_counts`; none of the user-facing field rules
    /// apply and `updated_at` is left alone. Returns `false` if the article
    /// no longer exists.
    pub async fn set_comment_count(
        pool: &PgPool,
        id: DbId,
        count: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE articles SET comment_counts = $1 WHERE id = $2")
            .bind(count)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
