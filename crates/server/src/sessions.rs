//! In-memory conversation sessions keyed by a cookie.
//!
//! A request without a recognised cookie gets a fresh session and a
//! `Set-Cookie` header. Sessions idle for longer than the TTL are dropped,
//! and once the store is full the least recently used one makes room.
//!
//! The map lock is only held to find or create an entry; each session has
//! its own lock, so a slow recommendation only blocks its own session.

use axum::http::{HeaderMap, header};
use conversation::Session;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

pub type SessionId = Uuid;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Result of running a closure against a session
#[derive(Debug)]
pub struct SessionAccess<T> {
    pub id: SessionId,
    /// True when the session did not exist before this call
    pub created: bool,
    pub value: T,
}

#[derive(Debug)]
struct SessionEntry {
    session: Arc<Mutex<Session>>,
    last_seen: Instant,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, SessionEntry>>>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    /// `max_sessions` is clamped to at least one
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::default(),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Run `f` on the session for `id`, creating it when unknown or expired
    pub async fn with_session<T>(
        &self,
        id: Option<SessionId>,
        f: impl FnOnce(&mut Session) -> T,
    ) -> SessionAccess<T> {
        let (id, created, session) = self.checkout(id, Instant::now()).await;
        let value = f(&mut *session.lock().await);
        SessionAccess { id, created, value }
    }

    /// Find or create the entry for `id` and mark it used at `now`
    async fn checkout(
        &self,
        id: Option<SessionId>,
        now: Instant,
    ) -> (SessionId, bool, Arc<Mutex<Session>>) {
        let mut sessions = self.sessions.lock().await;
        self.evict_idle(&mut sessions, now);

        if let Some((id, entry)) = id.and_then(|id| sessions.get_mut(&id).map(|entry| (id, entry))) {
            entry.last_seen = now;
            return (id, false, Arc::clone(&entry.session));
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(oldest) => {
                    debug!("Session store full, evicting {}", oldest);
                    sessions.remove(&oldest);
                }
                None => break,
            }
        }

        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new()));
        sessions.insert(
            id,
            SessionEntry {
                session: Arc::clone(&session),
                last_seen: now,
            },
        );
        (id, true, session)
    }

    fn evict_idle(&self, sessions: &mut HashMap<SessionId, SessionEntry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_seen) <= self.ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {} idle sessions", evicted);
        }
    }

    /// Drop sessions idle for longer than the TTL as of `now`
    pub async fn evict_idle_at(&self, now: Instant) {
        let mut sessions = self.sessions.lock().await;
        self.evict_idle(&mut sessions, now);
    }

    /// Snapshot of one session
    pub async fn get(&self, id: SessionId) -> Option<Session> {
        let session = self
            .sessions
            .lock()
            .await
            .get(&id)
            .map(|entry| Arc::clone(&entry.session))?;
        let snapshot = session.lock().await.clone();
        Some(snapshot)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

/// Session id from the request's `Cookie` headers, if present and well formed
pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value for a session id
pub fn session_cookie(cookie_name: &str, id: SessionId) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", cookie_name, id)
}
