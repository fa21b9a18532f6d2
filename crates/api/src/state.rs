//! Shared application state.

use std::sync::Arc;

use inkpress_core::directory::UserDirectory;
use inkpress_db::DbPool;
use inkpress_notify::Notifier;

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The user directory is a trait object so tests can inject an
/// in-memory double in place of the Postgres-backed implementation.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (entity repositories).
    pub pool: DbPool,
    /// Server-side session store.
    pub sessions: Arc<SessionStore>,
    /// User lookup/persistence collaborator.
    pub directory: Arc<dyn UserDirectory>,
    /// Fire-and-forget outbound notifications.
    pub notifier: Notifier,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
