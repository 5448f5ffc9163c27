//! Persistence seam for articles and comments.
//!
//! The comment service and counter only see these traits, so the same
//! lifecycle runs against Postgres in production and against
//! [`MemoryStore`] in tests.

mod memory;
mod postgres;

use async_trait::async_trait;
use scribe_core::types::DbId;
use scribe_db::models::article::{Article, NewArticle, UpdateArticle};
use scribe_db::models::comment::{Comment, CommentFilter, CommentWithAuthor};

use crate::error::StoreError;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Article operations consumed by the comment lifecycle and the HTTP layer.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Look up an article; `None` means it does not exist.
    async fn find_article(&self, id: DbId) -> Result<Option<Article>, StoreError>;

    /// Overwrite the derived comment count, skipping article field rules.
    ///
    /// Returns `false` when the article no longer exists.
    async fn set_comment_count(&self, id: DbId, count: i64) -> Result<bool, StoreError>;

    async fn create_article(&self, input: NewArticle) -> Result<Article, StoreError>;

    /// Newest first.
    async fn list_articles(&self, limit: i64, offset: i64) -> Result<Vec<Article>, StoreError>;

    /// Apply a partial update; `slug` replaces the stored slug when set.
    async fn update_article(
        &self,
        id: DbId,
        input: &UpdateArticle,
        slug: Option<String>,
    ) -> Result<Option<Article>, StoreError>;

    /// Delete an article together with its comments.
    async fn delete_article(&self, id: DbId) -> Result<bool, StoreError>;
}

/// Comment operations. Reads always resolve the author summary.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Persist an already-validated comment.
    ///
    /// A missing article or user yields [`StoreError::Constraint`].
    async fn insert_comment(
        &self,
        user_id: DbId,
        article_id: DbId,
        text: &str,
    ) -> Result<Comment, StoreError>;

    /// Remove a comment in one step, returning it if it existed.
    async fn find_and_delete_comment(&self, id: DbId) -> Result<Option<Comment>, StoreError>;

    async fn count_comments(&self, article_id: DbId) -> Result<i64, StoreError>;

    /// Oldest first.
    async fn find_comments(&self, filter: &CommentFilter)
        -> Result<Vec<CommentWithAuthor>, StoreError>;

    async fn find_comment(
        &self,
        filter: &CommentFilter,
    ) -> Result<Option<CommentWithAuthor>, StoreError>;
}

/// A complete backend: both entity stores plus a liveness probe.
#[async_trait]
pub trait Store: ArticleStore + CommentStore {
    async fn ping(&self) -> Result<(), StoreError>;
}
