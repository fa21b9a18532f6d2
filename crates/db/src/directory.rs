//! sqlx-backed implementation of the `UserDirectory` seam.

use async_trait::async_trait;

use inkpress_core::directory::{DirectoryError, UserDirectory, UserIdentity};
use inkpress_core::types::{DbId, Timestamp};

use crate::models::user::User;
use crate::repositories::UserRepo;
use crate::DbPool;

/// Adapts the `users` table to the authentication pipeline.
#[derive(Clone)]
pub struct PgDirectory {
    pool: DbPool,
}

impl PgDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_identity(u: User) -> UserIdentity {
    UserIdentity {
        id: u.id,
        account: u.account,
        email: u.email,
        password_hash: u.password_hash,
        state: u.state,
        last_login_at: u.last_login_at,
    }
}

fn backend(e: sqlx::Error) -> DirectoryError {
    DirectoryError::Backend(e.to_string())
}

#[async_trait]
impl UserDirectory for PgDirectory {
    async fn find_by_id(&self, id: DbId) -> Result<Option<UserIdentity>, DirectoryError> {
        let row = UserRepo::find_by_id(&self.pool, id).await.map_err(backend)?;
        Ok(row.map(to_identity))
    }

    async fn find_by_account(
        &self,
        account: &str,
    ) -> Result<Option<UserIdentity>, DirectoryError> {
        let row = UserRepo::find_by_account(&self.pool, account)
            .await
            .map_err(backend)?;
        Ok(row.map(to_identity))
    }

    async fn record_login(&self, id: DbId, at: Timestamp) -> Result<(), DirectoryError> {
        UserRepo::record_login(&self.pool, id, at)
            .await
            .map_err(backend)
    }
}
