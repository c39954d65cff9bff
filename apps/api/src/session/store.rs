use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use super::{Session, SessionError};

/// In-memory sessions keyed by id. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> Session {
        let session = Session::new();
        self.sessions.insert(session.id, session.clone());
        session
    }

    /// Returns a snapshot and marks the session as seen.
    pub fn get(&self, id: Uuid) -> Result<Session, SessionError> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or(SessionError::UnknownSession(id))?;
        entry.last_seen = Utc::now();
        Ok(entry.value().clone())
    }

    /// Applies `f` under the entry lock. Do not run slow work inside `f`.
    pub fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or(SessionError::UnknownSession(id))?;
        entry.last_seen = Utc::now();
        f(entry.value_mut())
    }

    /// Drops every session not seen within `max_idle`. Returns how many went.
    pub fn purge_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let before = self.sessions.len();
        self.sessions.retain(|_, session| session.last_seen >= cutoff);
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credentials, Stage};

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.create();
        let b = store.create();
        let creds = Credentials {
            username: "u".to_string(),
            password: "p".to_string(),
        };

        store.update(a.id, |s| s.login(&creds, "u", "p")).unwrap();

        assert_eq!(store.get(a.id).unwrap().stage(), Stage::Upload);
        assert_eq!(store.get(b.id).unwrap().stage(), Stage::Login);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.get(id), Err(SessionError::UnknownSession(x)) if x == id));
        assert!(store.update(id, |s| s.logout()).is_err());
    }

    fn backdate(store: &SessionStore, id: Uuid, by: Duration) {
        store
            .sessions
            .get_mut(&id)
            .unwrap()
            .last_seen -= by;
    }

    #[test]
    fn test_idle_sessions_are_purged() {
        let store = SessionStore::new();
        let stale = store.create();
        let fresh = store.create();
        backdate(&store, stale.id, Duration::minutes(31));

        assert_eq!(store.purge_idle(Duration::minutes(30)), 1);
        assert!(matches!(store.get(stale.id), Err(SessionError::UnknownSession(_))));
        assert!(store.get(fresh.id).is_ok());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_access_refreshes_last_seen() {
        let store = SessionStore::new();
        let s = store.create();
        backdate(&store, s.id, Duration::hours(2));

        // Any read counts as activity and keeps the session alive.
        let seen = store.get(s.id).unwrap().last_seen;
        assert!(Utc::now() - seen < Duration::minutes(1));
        assert_eq!(store.purge_idle(Duration::minutes(30)), 0);
    }

    #[test]
    fn test_abandoned_sessions_are_reclaimed() {
        let store = SessionStore::new();
        let ids: Vec<Uuid> = (0..50_000).map(|_| store.create().id).collect();
        for id in &ids {
            backdate(&store, *id, Duration::hours(1));
        }
        let keep = store.create();

        assert_eq!(store.purge_idle(Duration::minutes(30)), 50_000);
        assert_eq!(store.len(), 1);
        assert!(store.get(keep.id).is_ok());
    }

    #[test]
    fn test_failed_update_leaves_session_unchanged() {
        let store = SessionStore::new();
        let s = store.create();
        assert!(store.update(s.id, |s| s.back()).is_err());
        assert_eq!(store.get(s.id).unwrap().stage(), Stage::Login);
    }
}
