//! Per-user sessions.

use crate::store::SessionStore;
use crate::{SessionError, SessionResult};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::fmt;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One user's session: its own store, never shared with other sessions.
pub struct Session {
    pub id: SessionId,
    pub store: SessionStore,
    pub opened_at: DateTime<Utc>,
}

impl Session {
    /// Time since the session was opened.
    pub fn open_for(&self) -> TimeDelta {
        Utc::now() - self.opened_at
    }
}

/// Live sessions of the process.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(
            id,
            Session {
                id,
                store: SessionStore::new(),
                opened_at: Utc::now(),
            },
        );
        info!(session = %id, "Session opened");
        id
    }

    pub fn get(&self, id: SessionId) -> SessionResult<&Session> {
        self.sessions.get(&id).ok_or(SessionError::NotFound { id })
    }

    pub fn get_mut(&mut self, id: SessionId) -> SessionResult<&mut Session> {
        self.sessions
            .get_mut(&id)
            .ok_or(SessionError::NotFound { id })
    }

    /// Ends a session and drops everything it loaded.
    pub fn close(&mut self, id: SessionId) -> SessionResult<Session> {
        let session = self
            .sessions
            .remove(&id)
            .ok_or(SessionError::NotFound { id })?;
        info!(
            session = %id,
            keys = session.store.keys().len(),
            open_for_s = session.open_for().num_seconds(),
            "Session closed"
        );
        Ok(session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
