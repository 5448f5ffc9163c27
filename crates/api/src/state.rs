use std::sync::Arc;

use scribe_comments::{CommentService, Store};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Article and comment persistence.
    pub store: Arc<dyn Store>,
    /// Comment lifecycle, including the background comment-count recounts.
    pub comments: CommentService,
}

impl AppState {
    /// Wire the comment service to `store`.
    pub fn new(config: ServerConfig, store: Arc<dyn Store>) -> Self {
        let comments = CommentService::new(Arc::clone(&store));
        Self {
            config: Arc::new(config),
            store,
            comments,
        }
    }
}
