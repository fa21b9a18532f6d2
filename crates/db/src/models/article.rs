//! Article entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use inkpress_core::types::{DbId, Timestamp};

/// Article state: visible to everyone.
pub const ARTICLE_STATE_PUBLISHED: i32 = 2;

/// Full article row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub state: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new article.
#[derive(Debug, Deserialize)]
pub struct CreateArticle {
    pub title: String,
    pub content: String,
}
