use std::sync::{Arc, RwLock};

use crate::models::CachedUser;
use crate::utils::session_store::Session;

/// In-memory snapshot of the session, shared by every screen
#[derive(Clone)]
pub struct AppState {
    inner: Arc<RwLock<AppStateInner>>,
}

struct AppStateInner {
    session: Option<Session>,
    app_version: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                session: None,
                app_version: env!("CARGO_PKG_VERSION").to_string(),
            })),
        }
    }

    pub fn with_session(session: Option<Session>) -> Self {
        let state = Self::new();
        if let Some(session) = session {
            state.set_session(session);
        }
        state
    }

    pub fn set_session(&self, session: Session) {
        if let Ok(mut state) = self.inner.write() {
            state.session = Some(session);
        }
    }

    /// Replace the cached user, keeping the token
    pub fn set_user(&self, user: CachedUser) {
        if let Ok(mut state) = self.inner.write() {
            if let Some(session) = state.session.as_mut() {
                session.refresh_user(user);
            }
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.read().ok()?.session.clone()
    }

    pub fn user(&self) -> Option<CachedUser> {
        self.inner.read().ok()?.session.as_ref().map(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().ok()?.session.as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().ok().is_some_and(|s| s.session.is_some())
    }

    pub fn is_venue_manager(&self) -> bool {
        self.inner
            .read()
            .ok()
            .is_some_and(|s| s.session.as_ref().is_some_and(|s| s.user.venue_manager))
    }

    pub fn app_version(&self) -> String {
        self.inner
            .read()
            .ok()
            .map(|s| s.app_version.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Forget the session (logout, 401)
    pub fn clear(&self) {
        if let Ok(mut state) = self.inner.write() {
            state.session = None;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            "tok",
            CachedUser {
                name: "kari".into(),
                venue_manager: true,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_session_lifecycle() {
        let state = AppState::new();
        assert!(!state.is_authenticated());
        assert_eq!(state.token(), None);

        state.set_session(session());
        assert!(state.is_authenticated());
        assert!(state.is_venue_manager());
        assert_eq!(state.token().as_deref(), Some("tok"));

        state.clear();
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
    }

    #[test]
    fn test_set_user_keeps_token_and_is_shared() {
        let state = AppState::with_session(Some(session()));
        let other = state.clone();

        other.set_user(CachedUser {
            name: "kari".into(),
            venue_manager: false,
            ..Default::default()
        });

        assert!(!state.is_venue_manager());
        assert_eq!(state.token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_set_user_resets_staleness() {
        let mut old = session();
        old.synced_at = 0;
        let state = AppState::with_session(Some(old));
        assert!(state.session().unwrap().is_stale());

        state.set_user(CachedUser { name: "kari".into(), ..Default::default() });
        assert!(!state.session().unwrap().is_stale());
    }

    #[test]
    fn test_set_user_without_session_is_ignored() {
        let state = AppState::new();
        state.set_user(CachedUser::default());
        assert!(!state.is_authenticated());
    }
}
