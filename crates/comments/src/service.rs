//! The comment lifecycle: validate, persist or remove, then recount.

use std::sync::Arc;

use scribe_core::comment::normalize_comment_text;
use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_db::models::comment::{Comment, CommentFilter, CommentWithAuthor};

use crate::counter::ArticleCounter;
use crate::error::{CommentError, StoreError};
use crate::store::{ArticleStore, CommentStore, Store};

/// Owns comment writes and keeps `articles.comment_counts` in step.
///
/// Every successful create or delete ends by scheduling a recount for the
/// affected article. The recount is not awaited, so a caller may briefly
/// observe the previous count.
#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn Store>,
    counter: ArticleCounter,
}

impl CommentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let counter = ArticleCounter::new(Arc::clone(&store));
        Self { store, counter }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub fn counter(&self) -> &ArticleCounter {
        &self.counter
    }

    /// Create a comment on an existing article.
    ///
    /// Fails with [`CoreError::Validation`] for empty text and with
    /// [`CoreError::NotFound`] when the article does not exist; nothing is
    /// persisted in either case.
    pub async fn create(
        &self,
        text: &str,
        user_id: DbId,
        article_id: DbId,
    ) -> Result<Comment, CommentError> {
        let text = normalize_comment_text(text)?;

        if self.store.find_article(article_id).await?.is_none() {
            return Err(article_not_found(article_id));
        }

        // The article can still disappear between the lookup and the insert;
        // the FK turns that into the same NotFound.
        let comment = self
            .store
            .insert_comment(user_id, article_id, &text)
            .await
            .map_err(|e| match e {
                StoreError::Constraint(ref c) if c.contains("article_id") => {
                    article_not_found(article_id)
                }
                other => CommentError::Store(other),
            })?;

        tracing::info!(
            comment_id = comment.id,
            article_id,
            user_id,
            "Comment created"
        );

        self.counter.schedule(article_id);
        Ok(comment)
    }

    /// Delete a comment if it exists.
    ///
    /// Returns whether a comment was removed. A missing comment is not an
    /// error and does not trigger a recount.
    pub async fn delete(&self, comment_id: DbId) -> Result<bool, CommentError> {
        let Some(removed) = self.store.find_and_delete_comment(comment_id).await? else {
            tracing::debug!(comment_id, "Delete of missing comment ignored");
            return Ok(false);
        };

        tracing::info!(
            comment_id,
            article_id = removed.article_id,
            "Comment deleted"
        );

        self.counter.schedule(removed.article_id);
        Ok(true)
    }

    /// All comments matching `filter`, oldest first, with authors resolved.
    pub async fn find_many(
        &self,
        filter: &CommentFilter,
    ) -> Result<Vec<CommentWithAuthor>, CommentError> {
        Ok(self.store.find_comments(filter).await?)
    }

    /// The first comment matching `filter`, with its author resolved.
    pub async fn find_one(
        &self,
        filter: &CommentFilter,
    ) -> Result<Option<CommentWithAuthor>, CommentError> {
        Ok(self.store.find_comment(filter).await?)
    }

    /// All comments on an article, oldest first.
    pub async fn list_for_article(
        &self,
        article_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, CommentError> {
        self.find_many(&CommentFilter::by_article(article_id)).await
    }

    /// A single comment by id, or [`CoreError::NotFound`].
    pub async fn get(&self, comment_id: DbId) -> Result<CommentWithAuthor, CommentError> {
        self.find_one(&CommentFilter::by_id(comment_id))
            .await?
            .ok_or_else(|| {
                CommentError::Core(CoreError::NotFound {
                    entity: "Comment",
                    id: comment_id,
                })
            })
    }
}

fn article_not_found(article_id: DbId) -> CommentError {
    CommentError::Core(CoreError::NotFound {
        entity: "Article",
        id: article_id,
    })
}
