//! Server-side session store.
//!
//! Sessions are keyed by an unguessable id carried in the `SSESSIONID`
//! cookie. The store is an in-process map guarded by an outer `RwLock`
//! for membership and a per-record `Mutex` for mutation, so two
//! requests racing on the same session id (e.g. two browser tabs
//! attempting auto-login) serialize on the record, while unrelated
//! sessions never contend. Promotion to authenticated happens at most
//! once per record.
//!
//! Records are never deleted by the request pipeline; the background
//! sweeper prunes records idle past a configured TTL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use inkpress_core::types::{DbId, Timestamp};

/// Per-session state.
///
/// A fixed, typed set of fields rather than a string-keyed attribute
/// bag: the pipeline only ever tracks who is logged in and whether an
/// auto-login attempt has already happened.
#[derive(Debug)]
pub struct SessionRecord {
    /// Authenticated user id; 0 means unauthenticated. Once nonzero it
    /// is never cleared by the pipeline.
    pub user_id: DbId,
    /// Set after the first auto-login attempt, success or failure.
    /// Suppresses any further attempt for this record's lifetime.
    pub auth_attempted: bool,
    pub created_at: Timestamp,
    pub last_seen: Timestamp,
}

impl SessionRecord {
    fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            user_id: 0,
            auth_attempted: false,
            created_at: now,
            last_seen: now,
        }
    }
}

/// A session id together with its locked record.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: String,
    pub record: Arc<Mutex<SessionRecord>>,
}

/// In-process session store.
///
/// Thread-safe via interior locks; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<SessionRecord>>>>,
}

impl SessionStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a session by id, touching its last-seen timestamp.
    ///
    /// Absence is `None`, never an error.
    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        let record = self.sessions.read().await.get(id).cloned()?;
        record.lock().await.last_seen = chrono::Utc::now();
        Some(SessionHandle {
            id: id.to_string(),
            record,
        })
    }

    /// Allocate a fresh session with an unguessable id and register it
    /// so a subsequent [`get`](Self::get) with the same id succeeds.
    pub async fn create(&self) -> SessionHandle {
        let id = Uuid::new_v4().simple().to_string();
        let record = Arc::new(Mutex::new(SessionRecord::new()));
        self.sessions
            .write()
            .await
            .insert(id.clone(), record.clone());
        SessionHandle { id, record }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions idle longer than `max_idle`. Returns how many
    /// were removed.
    ///
    /// Never awaits a record mutex while holding the map lock: a
    /// record can be held across a slow directory call by an in-flight
    /// request, and parking here inside the map lock would stall
    /// `create`/`get` for every unrelated session. A record whose
    /// mutex is held is mid-request and therefore not idle; it is
    /// skipped until the next sweep.
    pub async fn prune_idle(&self, max_idle: Duration) -> usize {
        let cutoff = chrono::Utc::now()
            - chrono::Duration::from_std(max_idle).unwrap_or(chrono::Duration::zero());

        // Snapshot the map, then release it before inspecting records.
        let snapshot: Vec<(String, Arc<Mutex<SessionRecord>>)> = {
            let sessions = self.sessions.read().await;
            sessions
                .iter()
                .map(|(id, record)| (id.clone(), Arc::clone(record)))
                .collect()
        };

        let mut stale = Vec::new();
        for (id, record) in snapshot {
            if let Ok(rec) = record.try_lock() {
                if rec.last_seen < cutoff {
                    stale.push(id);
                }
            }
        }

        let mut removed = 0;
        let mut sessions = self.sessions.write().await;
        for id in stale {
            // Re-check without blocking so a record touched (or
            // claimed) since the snapshot survives.
            let still_stale = match sessions.get(&id) {
                Some(record) => match record.try_lock() {
                    Ok(rec) => rec.last_seen < cutoff,
                    Err(_) => false,
                },
                None => false,
            };
            if still_stale {
                sessions.remove(&id);
                removed += 1;
            }
        }
        removed
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
