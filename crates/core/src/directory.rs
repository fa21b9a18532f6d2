//! User lookup collaborator interface.
//!
//! The request pipeline never talks to the database directly; it goes
//! through [`UserDirectory`], injected as `Arc<dyn UserDirectory>`.
//! Production wires the sqlx-backed implementation from `inkpress-db`;
//! tests inject an in-memory double.

use async_trait::async_trait;

use crate::types::{DbId, Timestamp};

/// Account state value meaning the user may log in.
///
/// The `users.state` column: 1 = pending email confirmation,
/// 2 = active, 3 = banned.
pub const USER_STATE_ACTIVE: i32 = 2;

/// A user's identity as seen by the authentication pipeline.
///
/// Read-only from the pipeline's perspective except for the last-login
/// timestamp, which is updated through [`UserDirectory::record_login`].
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub id: DbId,
    pub account: String,
    pub email: String,
    /// Argon2 password hash. Never serialized; also feeds the
    /// remember-me token derivation as user-specific secret material.
    pub password_hash: String,
    /// Account state; must equal [`USER_STATE_ACTIVE`] to authenticate.
    pub state: i32,
    pub last_login_at: Option<Timestamp>,
}

impl UserIdentity {
    /// Whether this account is allowed to authenticate.
    pub fn is_active(&self) -> bool {
        self.state == USER_STATE_ACTIVE
    }
}

/// Error from a directory lookup or update.
///
/// The pipeline treats any of these as "no auto-login" (fail closed)
/// rather than failing the request.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The backing store failed.
    #[error("directory backend error: {0}")]
    Backend(String),
}

/// Lookup and persistence seam for [`UserIdentity`].
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by internal id.
    async fn find_by_id(&self, id: DbId) -> Result<Option<UserIdentity>, DirectoryError>;

    /// Find a user by account name (case-sensitive).
    async fn find_by_account(
        &self,
        account: &str,
    ) -> Result<Option<UserIdentity>, DirectoryError>;

    /// Record a successful login at `at`.
    async fn record_login(&self, id: DbId, at: Timestamp) -> Result<(), DirectoryError>;
}
