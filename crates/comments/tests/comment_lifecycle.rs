//! End-to-end comment lifecycle against the in-memory store:
//! create/delete semantics, author resolution on reads, and convergence of
//! the denormalized article comment count.

use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use scribe_comments::{
    ArticleStore, CommentError, CommentService, CommentStore, MemoryStore, Store, StoreError,
};
use scribe_core::error::CoreError;
use scribe_core::types::DbId;
use scribe_db::models::article::{Article, NewArticle, UpdateArticle};
use scribe_db::models::comment::{Comment, CommentFilter, CommentWithAuthor};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    store: Arc<MemoryStore>,
    service: CommentService,
    user_id: i64,
    article_id: i64,
}

async fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let user = store.add_user("ada", "Ada Lovelace").await;
    let article = store
        .create_article(NewArticle {
            author_id: user.id,
            title: "Notes on the Analytical Engine".to_string(),
            slug: "notes-on-the-analytical-engine".to_string(),
            short_description: String::new(),
            body: "body".to_string(),
            image: String::new(),
            expertise_level: "advanced".to_string(),
            tags: vec!["history".to_string()],
        })
        .await
        .unwrap();

    let service = CommentService::new(store.clone());
    Fixture {
        store,
        service,
        user_id: user.id,
        article_id: article.id,
    }
}

async fn comment_counts(fx: &Fixture) -> i64 {
    fx.service.counter().wait_idle().await;
    fx.store
        .find_article(fx.article_id)
        .await
        .unwrap()
        .unwrap()
        .comment_counts
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn created_comment_is_listed_for_its_article() {
    let fx = fixture().await;

    let comment = fx
        .service
        .create("  Lovely notes.  ", fx.user_id, fx.article_id)
        .await
        .unwrap();
    assert_eq!(comment.text, "Lovely notes.");
    assert_eq!(comment.article_id, fx.article_id);

    let listed = fx.service.list_for_article(fx.article_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, comment.id);
    assert_eq!(listed[0].text, "Lovely notes.");
}

#[tokio::test]
async fn empty_text_is_rejected_and_not_persisted() {
    let fx = fixture().await;

    for text in ["", "   ", "\n\t"] {
        let result = fx.service.create(text, fx.user_id, fx.article_id).await;
        assert_matches!(result, Err(CommentError::Core(CoreError::Validation(_))));
    }

    assert!(fx.service.list_for_article(fx.article_id).await.unwrap().is_empty());
    assert_eq!(fx.service.counter().pending(), 0);
    assert_eq!(fx.store.count_writes(), 0);
}

#[tokio::test]
async fn missing_article_is_not_found_and_not_persisted() {
    let fx = fixture().await;
    let missing = fx.article_id + 1_000;

    let result = fx.service.create("hello", fx.user_id, missing).await;
    assert_matches!(
        result,
        Err(CommentError::Core(CoreError::NotFound { entity: "Article", id })) if id == missing
    );

    let all = fx.service.find_many(&CommentFilter::default()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn not_found_message_names_the_article() {
    let fx = fixture().await;

    let err = fx
        .service
        .create("hello", fx.user_id, fx.article_id + 1)
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("No Article found with that ID"));
}

/// Reports the article as present, then loses it before the insert lands,
/// the way a concurrent article delete would under Postgres.
struct ArticleDeletedMidCreate {
    inner: Arc<MemoryStore>,
}

#[async_trait]
impl ArticleStore for ArticleDeletedMidCreate {
    async fn find_article(&self, id: DbId) -> Result<Option<Article>, StoreError> {
        self.inner.find_article(id).await
    }

    async fn set_comment_count(&self, id: DbId, count: i64) -> Result<bool, StoreError> {
        self.inner.set_comment_count(id, count).await
    }

    async fn create_article(&self, input: NewArticle) -> Result<Article, StoreError> {
        self.inner.create_article(input).await
    }

    async fn list_articles(&self, limit: i64, offset: i64) -> Result<Vec<Article>, StoreError> {
        self.inner.list_articles(limit, offset).await
    }

    async fn update_article(
        &self,
        id: DbId,
        input: &UpdateArticle,
        slug: Option<String>,
    ) -> Result<Option<Article>, StoreError> {
        self.inner.update_article(id, input, slug).await
    }

    async fn delete_article(&self, id: DbId) -> Result<bool, StoreError> {
        self.inner.delete_article(id).await
    }
}

#[async_trait]
impl CommentStore for ArticleDeletedMidCreate {
    async fn insert_comment(
        &self,
        _user_id: DbId,
        _article_id: DbId,
        _text: &str,
    ) -> Result<Comment, StoreError> {
        Err(StoreError::Constraint("comments_article_id_fkey".into()))
    }

    async fn find_and_delete_comment(&self, id: DbId) -> Result<Option<Comment>, StoreError> {
        self.inner.find_and_delete_comment(id).await
    }

    async fn count_comments(&self, article_id: DbId) -> Result<i64, StoreError> {
        self.inner.count_comments(article_id).await
    }

    async fn find_comments(
        &self,
        filter: &CommentFilter,
    ) -> Result<Vec<CommentWithAuthor>, StoreError> {
        self.inner.find_comments(filter).await
    }

    async fn find_comment(
        &self,
        filter: &CommentFilter,
    ) -> Result<Option<CommentWithAuthor>, StoreError> {
        self.inner.find_comment(filter).await
    }
}

#[async_trait]
impl Store for ArticleDeletedMidCreate {
    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

#[tokio::test]
async fn article_deleted_before_insert_is_not_found() {
    let fx = fixture().await;
    let service = CommentService::new(Arc::new(ArticleDeletedMidCreate {
        inner: fx.store.clone(),
    }));

    let result = service.create("too late", fx.user_id, fx.article_id).await;

    assert_matches!(
        result,
        Err(CommentError::Core(CoreError::NotFound { entity: "Article", id })) if id == fx.article_id
    );
    assert_eq!(service.counter().pending(), 0);
    service.counter().wait_idle().await;
    assert_eq!(fx.store.count_writes(), 0);
}

#[tokio::test]
async fn user_constraint_violation_stays_a_store_error() {
    let fx = fixture().await;

    let result = fx.service.create("ghost", 9_999, fx.article_id).await;

    assert_matches!(
        result,
        Err(CommentError::Store(StoreError::Constraint(ref c))) if c.contains("user_id")
    );
    assert_eq!(fx.service.counter().pending(), 0);
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn count_converges_after_n_creates() {
    let fx = fixture().await;

    for i in 0..5 {
        fx.service
            .create(&format!("comment {i}"), fx.user_id, fx.article_id)
            .await
            .unwrap();
    }

    assert_eq!(comment_counts(&fx).await, 5);
}

#[tokio::test]
async fn count_converges_after_creates_and_deletes() {
    let fx = fixture().await;

    let mut ids = Vec::new();
    for i in 0..4 {
        let comment = fx
            .service
            .create(&format!("comment {i}"), fx.user_id, fx.article_id)
            .await
            .unwrap();
        ids.push(comment.id);
    }

    assert!(fx.service.delete(ids[0]).await.unwrap());
    assert!(fx.service.delete(ids[2]).await.unwrap());

    assert_eq!(comment_counts(&fx).await, 2);
}

#[tokio::test]
async fn deleting_missing_comment_is_a_noop() {
    let fx = fixture().await;
    fx.service.create("keep me", fx.user_id, fx.article_id).await.unwrap();
    assert_eq!(comment_counts(&fx).await, 1);
    let writes_before = fx.store.count_writes();

    let removed = fx.service.delete(9_999).await.unwrap();

    assert!(!removed);
    assert_eq!(fx.service.counter().pending(), 0);
    assert_eq!(fx.store.count_writes(), writes_before);
    assert_eq!(comment_counts(&fx).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_converge_without_lost_update() {
    let fx = fixture().await;

    let (a, b) = tokio::join!(
        fx.service.create("first", fx.user_id, fx.article_id),
        fx.service.create("second", fx.user_id, fx.article_id),
    );
    a.unwrap();
    b.unwrap();

    assert_eq!(comment_counts(&fx).await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_spawned_creates_converge() {
    let fx = fixture().await;

    let mut handles = Vec::new();
    for i in 0..20 {
        let service = fx.service.clone();
        let (user_id, article_id) = (fx.user_id, fx.article_id);
        handles.push(tokio::spawn(async move {
            service
                .create(&format!("comment {i}"), user_id, article_id)
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(comment_counts(&fx).await, 20);
}

#[tokio::test]
async fn recount_failure_does_not_fail_the_create() {
    let fx = fixture().await;
    fx.store.set_fail_count_writes(true);

    let comment = fx.service.create("still saved", fx.user_id, fx.article_id).await;
    assert!(comment.is_ok(), "create must not surface recount failures");

    // The count is stale while writes fail...
    assert_eq!(comment_counts(&fx).await, 0);

    // ...and heals on the next comment write.
    fx.store.set_fail_count_writes(false);
    fx.service.create("second", fx.user_id, fx.article_id).await.unwrap();
    assert_eq!(comment_counts(&fx).await, 2);
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reads_resolve_author_summary() {
    let fx = fixture().await;
    let grace = fx.store.add_user("grace", "Grace Hopper").await;

    fx.service.create("from ada", fx.user_id, fx.article_id).await.unwrap();
    fx.service.create("from grace", grace.id, fx.article_id).await.unwrap();

    let listed = fx.service.list_for_article(fx.article_id).await.unwrap();
    assert_eq!(listed.len(), 2);

    assert_eq!(listed[0].user.username, "ada");
    assert_eq!(listed[0].user.fullname, "Ada Lovelace");
    assert_eq!(listed[0].user.photo, "default.jpg");
    assert_eq!(listed[1].user.username, "grace");
    assert_eq!(listed[1].user.fullname, "Grace Hopper");

    let json = serde_json_value(&listed[1]);
    assert!(json["user"].is_object(), "user must be a resolved object, not an id");
}

#[tokio::test]
async fn find_one_and_get_by_filter() {
    let fx = fixture().await;
    let grace = fx.store.add_user("grace", "Grace Hopper").await;

    fx.service.create("from ada", fx.user_id, fx.article_id).await.unwrap();
    let target = fx
        .service
        .create("from grace", grace.id, fx.article_id)
        .await
        .unwrap();

    let filter = CommentFilter {
        user_id: Some(grace.id),
        ..CommentFilter::default()
    };
    let found = fx.service.find_one(&filter).await.unwrap().unwrap();
    assert_eq!(found.id, target.id);
    assert_eq!(found.user.username, "grace");

    let got = fx.service.get(target.id).await.unwrap();
    assert_eq!(got.text, "from grace");

    assert_matches!(
        fx.service.get(target.id + 100).await,
        Err(CommentError::Core(CoreError::NotFound { entity: "Comment", .. }))
    );
}

fn serde_json_value<T: serde::Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap()
}
