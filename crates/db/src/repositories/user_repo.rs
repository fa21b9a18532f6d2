//! Repository for the `users` table.

use sqlx::PgPool;

use inkpress_core::types::{DbId, Timestamp};

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, account, email, password_hash, state, last_login_at, created_at, updated_at";

/// Provides lookup and login-bookkeeping queries for users.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by account name (case-sensitive).
    pub async fn find_by_account(
        pool: &PgPool,
        account: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE account = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(account)
            .fetch_optional(pool)
            .await
    }

    /// Set the last-login timestamp.
    pub async fn record_login(
        pool: &PgPool,
        id: DbId,
        at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(pool)
            .await?;
        Ok(())
    }
}
