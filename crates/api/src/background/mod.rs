//! Background maintenance tasks.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::session::SessionStore;

/// Spawn the periodic session sweeper.
///
/// Every `interval` the store is pruned of sessions idle longer than
/// `max_idle`. Runs for the life of the process.
pub fn spawn_session_sweeper(
    sessions: Arc<SessionStore>,
    interval: Duration,
    max_idle: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so a fresh store
        // is not swept at startup.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let pruned = sessions.prune_idle(max_idle).await;
            if pruned > 0 {
                tracing::debug!(pruned, "pruned idle sessions");
            }
        }
    })
}
