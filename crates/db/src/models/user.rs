//! User entity model.

use sqlx::FromRow;

use inkpress_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- never serialize this to API
/// responses.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub account: String,
    pub email: String,
    pub password_hash: String,
    pub state: i32,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
