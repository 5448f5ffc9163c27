//! Comment entity model, DTOs, and the author-joined read projection.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scribe_core::types::{DbId, Timestamp};

use crate::models::user::AuthorSummary;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub text: String,
    pub user_id: DbId,
    pub article_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a comment. The article comes from the path and
/// the user from the access token.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub text: String,
}

/// A comment with its author resolved, as returned by every read.
#[derive(Debug, Clone, Serialize)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub text: String,
    pub article_id: DbId,
    pub user: AuthorSummary,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Flat row produced by the `comments JOIN users` query.
#[derive(Debug, Clone, FromRow)]
pub struct CommentAuthorRow {
    pub id: DbId,
    pub text: String,
    pub article_id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub fullname: String,
    pub photo: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CommentAuthorRow> for CommentWithAuthor {
    fn from(row: CommentAuthorRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            article_id: row.article_id,
            user: AuthorSummary {
                id: row.user_id,
                username: row.username,
                fullname: row.fullname,
                photo: row.photo,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Criteria for comment lookups. Set fields are ANDed; an empty filter
/// matches every comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CommentFilter {
    pub id: Option<DbId>,
    pub article_id: Option<DbId>,
    pub user_id: Option<DbId>,
}

impl CommentFilter {
    /// Match a single comment by id.
    pub fn by_id(id: DbId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Match every comment on an article.
    pub fn by_article(article_id: DbId) -> Self {
        Self {
            article_id: Some(article_id),
            ..Self::default()
        }
    }

    /// Whether a comment satisfies every set criterion.
    pub fn matches(&self, comment: &Comment) -> bool {
        self.id.is_none_or(|id| comment.id == id)
            && self.article_id.is_none_or(|id| comment.article_id == id)
            && self.user_id.is_none_or(|id| comment.user_id == id)
    }
}
