//! Article entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scribe_core::types::{DbId, Timestamp};

/// A row from the `articles` table.
///
/// `comment_counts` is derived from the `comments` table and is only ever
/// written by the comment counter.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub body: String,
    pub image: String,
    pub expertise_level: String,
    pub tags: Vec<String>,
    pub comment_counts: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new article. The slug is generated server-side.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticle {
    pub title: String,
    pub short_description: Option<String>,
    pub body: String,
    pub image: Option<String>,
    pub expertise_level: String,
    pub tags: Vec<String>,
}

/// Fully validated values for a new article row, built by the API layer
/// from a [`CreateArticle`] after validation and slug generation.
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub author_id: DbId,
    pub title: String,
    pub slug: String,
    pub short_description: String,
    pub body: String,
    pub image: String,
    pub expertise_level: String,
    pub tags: Vec<String>,
}

/// DTO for updating an existing article. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
    pub expertise_level: Option<String>,
    pub tags: Option<Vec<String>>,
}
