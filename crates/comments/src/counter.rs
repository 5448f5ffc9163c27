//! Recomputation of the denormalized `comment_counts` field.
//!
//! A recount always does a fresh `COUNT(*)` followed by an absolute write.
//! Recounts of the same article hold a striped lock across both steps, so a
//! stale count can never be written over a newer one: whichever recount runs
//! last started counting after the last comment write it could observe.

use std::sync::Arc;
use std::time::Duration;

use scribe_core::types::DbId;
use tokio::sync::Mutex;
use tokio_util::task::TaskTracker;

use crate::error::RecountError;

/// Number of locks recounts are striped over, keyed by article id.
const RECOUNT_STRIPES: usize = 16;
use crate::store::{ArticleStore, CommentStore, Store};

/// Maintains `articles.comment_counts`.
///
/// Cheap to clone; clones share the same task tracker.
#[derive(Clone)]
pub struct ArticleCounter {
    store: Arc<dyn Store>,
    tracker: TaskTracker,
    stripes: Arc<[Mutex<()>]>,
    /// Set once by `shutdown`. Held while `wait_idle` has the tracker
    /// closed, so the two never interleave.
    shut_down: Arc<Mutex<bool>>,
}

impl ArticleCounter {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            tracker: TaskTracker::new(),
            stripes: (0..RECOUNT_STRIPES).map(|_| Mutex::new(())).collect(),
            shut_down: Arc::new(Mutex::new(false)),
        }
    }

    /// Count the article's comments and write the result back.
    ///
    /// Returns the count that was written. Writing to an article that was
    /// deleted in the meantime is not an error.
    pub async fn recount(&self, article_id: DbId) -> Result<i64, RecountError> {
        let stripe = article_id.rem_euclid(RECOUNT_STRIPES as i64) as usize;
        let _guard = self.stripes[stripe].lock().await;

        let count = self
            .store
            .count_comments(article_id)
            .await
            .map_err(RecountError::Count)?;

        let updated = self
            .store
            .set_comment_count(article_id, count)
            .await
            .map_err(RecountError::WriteBack)?;

        if updated {
            tracing::debug!(article_id, count, "Comment count updated");
        } else {
            tracing::debug!(article_id, "Article gone before comment count write-back");
        }

        Ok(count)
    }

    /// Run [`recount`](Self::recount) as a detached task.
    ///
    /// The caller never waits on it and never sees its errors; failures are
    /// logged and left for the next comment write to correct.
    pub fn schedule(&self, article_id: DbId) {
        let counter = self.clone();
        self.tracker.spawn(async move {
            if let Err(e) = counter.recount(article_id).await {
                tracing::error!(article_id, error = %e, "Comment recount failed");
            }
        });
    }

    /// Number of recounts currently in flight.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every recount scheduled so far has finished.
    ///
    /// New recounts may still be scheduled while and after this runs.
    /// After [`shutdown`](Self::shutdown) the tracker stays closed.
    pub async fn wait_idle(&self) {
        let shut_down = self.shut_down.lock().await;
        if *shut_down {
            drop(shut_down);
            self.tracker.wait().await;
            return;
        }

        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Wait up to `timeout` for in-flight recounts during shutdown.
    ///
    /// Returns `false` if some recounts were still running at the deadline.
    pub async fn shutdown(&self, timeout: Duration) -> bool {
        let pending = self.tracker.len();
        let drain = async {
            *self.shut_down.lock().await = true;
            self.tracker.close();
            self.tracker.wait().await;
        };
        let drained = tokio::time::timeout(timeout, drain).await.is_ok();

        if drained {
            tracing::info!(pending, "Comment recounts drained");
        } else {
            tracing::warn!(
                remaining = self.tracker.len(),
                "Shutdown deadline reached with comment recounts in flight"
            );
        }
        drained
    }
}
