use async_trait::async_trait;
use scribe_core::types::DbId;
use scribe_db::models::article::{Article, NewArticle, UpdateArticle};
use scribe_db::models::comment::{Comment, CommentFilter, CommentWithAuthor};
use scribe_db::repositories::{ArticleRepo, CommentRepo};
use scribe_db::DbPool;

use super::{ArticleStore, CommentStore, Store};
use crate::error::StoreError;

/// PostgreSQL foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// [`Store`] backed by the `scribe-db` repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Surface FK violations as [`StoreError::Constraint`] so callers can tell
/// a vanished parent row apart from a broken connection.
fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            return StoreError::Constraint(constraint);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl ArticleStore for PgStore {
    async fn find_article(&self, id: DbId) -> Result<Option<Article>, StoreError> {
        Ok(ArticleRepo::find_by_id(&self.pool, id).await?)
    }

    async fn set_comment_count(&self, id: DbId, count: i64) -> Result<bool, StoreError> {
        Ok(ArticleRepo::set_comment_count(&self.pool, id, count).await?)
    }

    async fn create_article(&self, input: NewArticle) -> Result<Article, StoreError> {
        ArticleRepo::create(&self.pool, &input).await.map_err(classify)
    }

    async fn list_articles(&self, limit: i64, offset: i64) -> Result<Vec<Article>, StoreError> {
        Ok(ArticleRepo::list(&self.pool, limit, offset).await?)
    }

    async fn update_article(
        &self,
        id: DbId,
        input: &UpdateArticle,
        slug: Option<String>,
    ) -> Result<Option<Article>, StoreError> {
        Ok(ArticleRepo::update(&self.pool, id, input, slug.as_deref()).await?)
    }

    async fn delete_article(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ArticleRepo::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl CommentStore for PgStore {
    async fn insert_comment(
        &self,
        user_id: DbId,
        article_id: DbId,
        text: &str,
    ) -> Result<Comment, StoreError> {
        CommentRepo::create(&self.pool, user_id, article_id, text)
            .await
            .map_err(classify)
    }

    async fn find_and_delete_comment(&self, id: DbId) -> Result<Option<Comment>, StoreError> {
        Ok(CommentRepo::find_and_delete(&self.pool, id).await?)
    }

    async fn count_comments(&self, article_id: DbId) -> Result<i64, StoreError> {
        Ok(CommentRepo::count_for_article(&self.pool, article_id).await?)
    }

    async fn find_comments(
        &self,
        filter: &CommentFilter,
    ) -> Result<Vec<CommentWithAuthor>, StoreError> {
        Ok(CommentRepo::find_many(&self.pool, filter).await?)
    }

    async fn find_comment(
        &self,
        filter: &CommentFilter,
    ) -> Result<Option<CommentWithAuthor>, StoreError> {
        Ok(CommentRepo::find_one(&self.pool, filter).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(scribe_db::health_check(&self.pool).await?)
    }
}
