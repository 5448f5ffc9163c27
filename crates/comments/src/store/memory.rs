use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use scribe_core::types::DbId;
use scribe_db::models::article::{Article, NewArticle, UpdateArticle};
use scribe_db::models::comment::{Comment, CommentFilter, CommentWithAuthor};
use scribe_db::models::user::{AuthorSummary, User};
use tokio::sync::RwLock;

use super::{ArticleStore, CommentStore, Store};
use crate::error::StoreError;

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: BTreeMap<DbId, User>,
    articles: BTreeMap<DbId, Article>,
    comments: BTreeMap<DbId, Comment>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn with_author(&self, comment: &Comment) -> Option<CommentWithAuthor> {
        let user = self.users.get(&comment.user_id)?;
        Some(CommentWithAuthor {
            id: comment.id,
            text: comment.text.clone(),
            article_id: comment.article_id,
            user: AuthorSummary::from(user),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        })
    }
}

/// In-process [`Store`] with the same referential rules as the Postgres
/// schema: comments need an existing user and article, and deleting an
/// article drops its comments.
///
/// Counting and the comment-count write-back can be made to fail so the
/// best-effort recount path can be exercised.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    fail_counts: AtomicBool,
    fail_count_writes: AtomicBool,
    count_writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user. Sign-up lives outside this service, so this is the
    /// only way users appear in a memory store.
    pub async fn add_user(&self, username: &str, fullname: &str) -> User {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            username: username.to_string(),
            fullname: fullname.to_string(),
            email: format!("{username}@example.com"),
            photo: "default.jpg".to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        user
    }

    /// Make `count_comments` fail until reset.
    pub fn set_fail_counts(&self, fail: bool) {
        self.fail_counts.store(fail, Ordering::SeqCst);
    }

    /// Make `set_comment_count` fail until reset.
    pub fn set_fail_count_writes(&self, fail: bool) {
        self.fail_count_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set_comment_count` calls so far.
    pub fn count_writes(&self) -> usize {
        self.count_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn find_article(&self, id: DbId) -> Result<Option<Article>, StoreError> {
        Ok(self.tables.read().await.articles.get(&id).cloned())
    }

    async fn set_comment_count(&self, id: DbId, count: i64) -> Result<bool, StoreError> {
        if self.fail_count_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("comment count write disabled".into()));
        }

        let mut tables = self.tables.write().await;
        let Some(article) = tables.articles.get_mut(&id) else {
            return Ok(false);
        };
        article.comment_counts = count;
        self.count_writes.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn create_article(&self, input: NewArticle) -> Result<Article, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&input.author_id) {
            return Err(StoreError::Constraint("articles_author_id_fkey".into()));
        }

        let now = Utc::now();
        let article = Article {
            id: tables.next_id(),
            author_id: input.author_id,
            title: input.title,
            slug: input.slug,
            short_description: input.short_description,
            body: input.body,
            image: input.image,
            expertise_level: input.expertise_level,
            tags: input.tags,
            comment_counts: 0,
            created_at: now,
            updated_at: now,
        };
        tables.articles.insert(article.id, article.clone());
        Ok(article)
    }

    async fn list_articles(&self, limit: i64, offset: i64) -> Result<Vec<Article>, StoreError> {
        let tables = self.tables.read().await;
        let mut articles: Vec<Article> = tables.articles.values().cloned().collect();
        articles.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(articles
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .collect())
    }

    async fn update_article(
        &self,
        id: DbId,
        input: &UpdateArticle,
        slug: Option<String>,
    ) -> Result<Option<Article>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(article) = tables.articles.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = &input.title {
            article.title = title.clone();
        }
        if let Some(slug) = slug {
            article.slug = slug;
        }
        if let Some(short_description) = &input.short_description {
            article.short_description = short_description.clone();
        }
        if let Some(body) = &input.body {
            article.body = body.clone();
        }
        if let Some(image) = &input.image {
            article.image = image.clone();
        }
        if let Some(level) = &input.expertise_level {
            article.expertise_level = level.clone();
        }
        if let Some(tags) = &input.tags {
            article.tags = tags.clone();
        }
        article.updated_at = Utc::now();

        Ok(Some(article.clone()))
    }

    async fn delete_article(&self, id: DbId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.articles.remove(&id).is_none() {
            return Ok(false);
        }
        tables.comments.retain(|_, c| c.article_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert_comment(
        &self,
        user_id: DbId,
        article_id: DbId,
        text: &str,
    ) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.articles.contains_key(&article_id) {
            return Err(StoreError::Constraint("comments_article_id_fkey".into()));
        }
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::Constraint("comments_user_id_fkey".into()));
        }

        let now = Utc::now();
        let comment = Comment {
            id: tables.next_id(),
            text: text.to_string(),
            user_id,
            article_id,
            created_at: now,
            updated_at: now,
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_and_delete_comment(&self, id: DbId) -> Result<Option<Comment>, StoreError> {
        Ok(self.tables.write().await.comments.remove(&id))
    }

    async fn count_comments(&self, article_id: DbId) -> Result<i64, StoreError> {
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("comment count disabled".into()));
        }

        let tables = self.tables.read().await;
        let count = tables
            .comments
            .values()
            .filter(|c| c.article_id == article_id)
            .count();
        Ok(count as i64)
    }

    async fn find_comments(
        &self,
        filter: &CommentFilter,
    ) -> Result<Vec<CommentWithAuthor>, StoreError> {
        let tables = self.tables.read().await;
        let mut matched: Vec<&Comment> = tables
            .comments
            .values()
            .filter(|c| filter.matches(c))
            .collect();
        matched.sort_by_key(|c| (c.created_at, c.id));
        Ok(matched
            .into_iter()
            .filter_map(|c| tables.with_author(c))
            .collect())
    }

    async fn find_comment(
        &self,
        filter: &CommentFilter,
    ) -> Result<Option<CommentWithAuthor>, StoreError> {
        Ok(self.find_comments(filter).await?.into_iter().next())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
