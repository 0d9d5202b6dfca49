use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Res, types::Token};

/// How long a session may go unused before the memory store drops it.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Session persistence, keyed by opaque session id.
///
/// Handlers only ever go through this trait, so the backing storage (memory,
/// cache, database) can change without touching them.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Res<Option<Token>>;

    /// Creates or replaces the record for `session_id`. Last write wins.
    async fn set(&self, session_id: &str, token: Token) -> Res<()>;

    /// Removes the record. Clearing an unknown id is not an error.
    async fn clear(&self, session_id: &str) -> Res<()>;

    /// Number of live sessions.
    async fn count(&self) -> Res<usize>;
}

struct Entry {
    token: Token,
    last_seen: Instant,
}

impl Entry {
    fn is_idle(&self, now: Instant, timeout: Duration) -> bool {
        now.duration_since(self.last_seen) >= timeout
    }
}

/// Process-local session store. Sessions do not survive a restart.
///
/// Records unused for longer than the idle timeout are dropped lazily: a
/// `get` on an idle record misses, and every `set` sweeps the map.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
    idle_timeout: Duration,
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(SESSION_IDLE_TIMEOUT)
    }
}

impl MemorySessionStore {
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Number of stored records, idle ones included until the next sweep.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str) -> Res<Option<Token>> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let idle = match sessions.get(session_id) {
            Some(entry) => entry.is_idle(now, self.idle_timeout),
            None => return Ok(None),
        };
        if idle {
            sessions.remove(session_id);
            return Ok(None);
        }

        Ok(sessions.get_mut(session_id).map(|entry| {
            entry.last_seen = now;
            entry.token.clone()
        }))
    }

    async fn set(&self, session_id: &str, token: Token) -> Res<()> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        sessions.retain(|_, entry| !entry.is_idle(now, self.idle_timeout));
        sessions.insert(
            session_id.to_string(),
            Entry {
                token,
                last_seen: now,
            },
        );
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> Res<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }

    async fn count(&self) -> Res<usize> {
        Ok(self.len().await)
    }
}
