use scribe_core::error::CoreError;

/// Failure reported by a [`Store`](crate::store::Store) implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A referenced row does not exist. Carries the constraint name, e.g.
    /// `comments_article_id_fkey`.
    #[error("Foreign key violation: {0}")]
    Constraint(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by [`CommentService`](crate::service::CommentService) operations.
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A best-effort recount that did not complete. Logged, never surfaced.
#[derive(Debug, thiserror::Error)]
pub enum RecountError {
    #[error("failed to count comments: {0}")]
    Count(#[source] StoreError),

    #[error("failed to write comment count: {0}")]
    WriteBack(#[source] StoreError),
}
