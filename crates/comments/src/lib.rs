//! Comment lifecycle and the denormalized article comment count.
//!
//! - [`service::CommentService`] -- validates, persists, removes, and reads
//!   comments; schedules a recount after every successful write.
//! - [`counter::ArticleCounter`] -- recomputes `articles.comment_counts`
//!   from scratch in a detached, tracked task.
//! - [`store`] -- the persistence seam: [`store::PgStore`] for Postgres and
//!   [`store::MemoryStore`] for tests and local runs.

pub mod counter;
pub mod error;
pub mod service;
pub mod store;

pub use counter::ArticleCounter;
pub use error::{CommentError, RecountError, StoreError};
pub use service::CommentService;
pub use store::{ArticleStore, CommentStore, MemoryStore, PgStore, Store};
