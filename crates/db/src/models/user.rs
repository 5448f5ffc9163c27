//! User entity model and the author summary joined onto comments.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scribe_core::types::{DbId, Timestamp};

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub photo: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user. Sign-up itself lives outside this service;
/// this exists for seeding and tests.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub fullname: String,
    pub email: String,
    pub photo: Option<String>,
}

/// The public projection of a user shown next to their comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: DbId,
    pub username: String,
    pub fullname: String,
    pub photo: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            fullname: user.fullname.clone(),
            photo: user.photo.clone(),
        }
    }
}
