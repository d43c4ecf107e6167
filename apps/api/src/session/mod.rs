//! Per-session state. Each session owns its own history; nothing is shared
//! between sessions and nothing is persisted.
//!
//! A session ends when its client ends it, or once it has been idle for the
//! configured TTL. Every access refreshes the idle clock.

pub mod handlers;
pub mod history;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::advice::builder::PromptMode;
use crate::advice::generator::{AdviceText, GenerationError};
use crate::models::advice::AdviceResult;
use crate::models::profile::UserProfile;

pub use history::SessionHistory;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Session {0} not found")]
pub struct SessionNotFound(pub Uuid);

struct Session {
    history: SessionHistory,
    last_seen: Instant,
}

impl Session {
    fn is_idle(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.last_seen) >= ttl
    }
}

/// All live sessions, keyed by id. Cheap to clone; clones share the map.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

/// Returns the live session's history and refreshes its idle clock. An idle
/// session found here is dropped on the spot.
fn checkout(
    sessions: &mut HashMap<Uuid, Session>,
    id: Uuid,
    ttl: Duration,
) -> Result<&mut SessionHistory, SessionNotFound> {
    let now = Instant::now();
    if sessions.get(&id).is_some_and(|s| s.is_idle(now, ttl)) {
        sessions.remove(&id);
        info!("Session {id} expired after {}s idle", ttl.as_secs());
    }

    let session = sessions.get_mut(&id).ok_or(SessionNotFound(id))?;
    session.last_seen = now;
    Ok(&mut session.history)
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Starts a new session with an empty history. Idle sessions are swept first.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        Self::sweep(&mut sessions, self.ttl);
        sessions.insert(
            id,
            Session {
                history: SessionHistory::default(),
                last_seen: Instant::now(),
            },
        );
        info!("Session {id} started");
        id
    }

    /// Ends a session, discarding its history.
    pub async fn end(&self, id: Uuid) -> Result<(), SessionNotFound> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or(SessionNotFound(id))?;
        info!(
            "Session {id} ended ({} entries discarded)",
            session.history.len()
        );
        Ok(())
    }

    pub async fn ensure_exists(&self, id: Uuid) -> Result<(), SessionNotFound> {
        let mut sessions = self.sessions.write().await;
        checkout(&mut sessions, id, self.ttl).map(|_| ())
    }

    pub async fn record(
        &self,
        id: Uuid,
        profile: UserProfile,
        mode: PromptMode,
        outcome: Result<AdviceText, GenerationError>,
    ) -> Result<AdviceResult, SessionNotFound> {
        let mut sessions = self.sessions.write().await;
        let history = checkout(&mut sessions, id, self.ttl)?;
        Ok(history.record(profile, mode, outcome).clone())
    }

    pub async fn list(&self, id: Uuid) -> Result<Vec<AdviceResult>, SessionNotFound> {
        let mut sessions = self.sessions.write().await;
        let history = checkout(&mut sessions, id, self.ttl)?;
        Ok(history.list().to_vec())
    }

    pub async fn latest(&self, id: Uuid) -> Result<Option<AdviceResult>, SessionNotFound> {
        let mut sessions = self.sessions.write().await;
        let history = checkout(&mut sessions, id, self.ttl)?;
        Ok(history.latest().cloned())
    }

    /// Returns how many entries were removed.
    pub async fn clear(&self, id: Uuid) -> Result<usize, SessionNotFound> {
        let mut sessions = self.sessions.write().await;
        let history = checkout(&mut sessions, id, self.ttl)?;
        let removed = history.clear();
        info!("Session {id} history cleared ({removed} entries)");
        Ok(removed)
    }

    /// Live sessions only; idle ones are not counted.
    pub async fn active_sessions(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|s| !s.is_idle(now, self.ttl))
            .count()
    }

    /// Drops every session idle for at least the TTL and returns how many went.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::sweep(&mut sessions, self.ttl)
    }

    /// Runs `evict_idle` every `every` until the runtime shuts down.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let evicted = store.evict_idle().await;
                if evicted > 0 {
                    info!("Evicted {evicted} idle sessions");
                }
            }
        })
    }

    fn sweep(sessions: &mut HashMap<Uuid, Session>, ttl: Duration) -> usize {
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_idle(now, ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Swept {evicted} idle sessions");
        }
        evicted
    }
}
