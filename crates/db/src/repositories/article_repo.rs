//! Repository for the `articles` table.

use sqlx::PgPool;

use inkpress_core::types::DbId;

use crate::models::article::{Article, CreateArticle, ARTICLE_STATE_PUBLISHED};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, content, state, created_at, updated_at";

/// Provides read/write operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new published article owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateArticle,
    ) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (user_id, title, content, state)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(ARTICLE_STATE_PUBLISHED)
            .fetch_one(pool)
            .await
    }

    /// List published articles, newest first.
    pub async fn list_published(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles
             WHERE state = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(ARTICLE_STATE_PUBLISHED)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
