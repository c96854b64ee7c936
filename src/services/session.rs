//! Session context shared by the HTTP client and the routing layer.
//!
//! The context is an explicit object handed to [`ApiClient`](super::ApiClient)
//! at construction. The request path reads it synchronously through
//! [`SessionContext::snapshot`]; only login, logout and profile refresh write
//! to it.

use super::session_store::SessionPersistence;
use crate::error::AppResult;
use crate::models::AuthUser;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// An authenticated session: bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: AuthUser,

    /// Unix timestamp of the login that produced this session.
    pub authenticated_at: i64,
}

impl Session {
    pub fn new(token: impl Into<String>, user: AuthUser) -> Self {
        Self {
            token: token.into(),
            user,
            authenticated_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Immutable view of the session at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    session: Option<Session>,
}

impl SessionSnapshot {
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(AuthUser::is_admin)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}

struct Inner {
    state: RwLock<Option<Session>>,
    store: Option<Box<dyn SessionPersistence>>,
}

/// Shared, cloneable session holder.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .field("persistent", &self.inner.store.is_some())
            .finish()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl SessionContext {
    /// A session that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(None),
                store: None,
            }),
        }
    }

    /// Load the persisted session (if any) and write every later change through.
    ///
    /// Must complete before the first request so the token is in place.
    pub fn restore(store: impl SessionPersistence + 'static) -> AppResult<Self> {
        let loaded = store.load()?;
        if let Some(session) = &loaded {
            log::debug!("Restored session for {}", session.user.email);
        }

        Ok(Self {
            inner: Arc::new(Inner {
                state: RwLock::new(loaded),
                store: Some(Box::new(store)),
            }),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current state as an immutable snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session: self.read().clone(),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.read().as_ref().is_some_and(|s| s.user.is_admin())
    }

    /// Store a freshly issued token and its user.
    pub fn set_auth(&self, token: impl Into<String>, user: AuthUser) -> AppResult<()> {
        let session = Session::new(token, user);
        *self.write() = Some(session.clone());

        match &self.inner.store {
            Some(store) => store.save(&session),
            None => Ok(()),
        }
    }

    /// Replace the stored profile, keeping the token.
    ///
    /// Ignored when nobody is logged in.
    pub fn update_user(&self, user: AuthUser) -> AppResult<()> {
        let updated = {
            let mut state = self.write();
            match state.as_mut() {
                Some(session) => {
                    session.user = user;
                    Some(session.clone())
                }
                None => None,
            }
        };

        match (updated, &self.inner.store) {
            (Some(session), Some(store)) => store.save(&session),
            _ => Ok(()),
        }
    }

    /// Drop the session, in memory and on disk.
    pub fn logout(&self) -> AppResult<()> {
        *self.write() = None;

        match &self.inner.store {
            Some(store) => store.clear(),
            None => Ok(()),
        }
    }
}
