//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_repo;
pub mod comment_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use comment_repo::CommentRepo;
pub use user_repo::UserRepo;
