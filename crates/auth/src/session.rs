//! Session lifecycle: login, logout, developer bypass, persistence.
//!
//! # Invariants
//! - `is_authenticated() == current_identity().is_some()` after every
//!   operation (authentication is not stored separately, so this holds by
//!   construction).
//! - While bypass is enabled the live identity is the synthetic developer
//!   identity, unless a later login supersedes it (the persisted bypass flag
//!   is left untouched by login and logout).
//! - A persisted identity without the bypass flag never auto-authenticates.
//!
//! Persistence is best-effort through the [`SessionStore`] port: the
//! in-memory state is authoritative for the rest of the process lifetime.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::identity::Identity;
use crate::role::Role;
use crate::store::{SessionStore, keys};

/// Session mutation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Reserved for a wired-in credential verification collaborator. The
    /// core itself accepts any password today, so this is never produced
    /// locally, but the `login` signature keeps the channel open.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Login requires a non-empty email.
    #[error("email must not be empty")]
    EmptyEmail,
}

#[derive(Debug)]
struct SessionState {
    identity: Option<Identity>,
    bypass_enabled: bool,
}

/// Owns the authenticated-identity lifecycle for one logical session.
///
/// Constructed once at process start; restores persisted state immediately.
/// All mutations are synchronous and total — a slow or failed persistence
/// write never blocks the in-memory transition.
pub struct SessionManager {
    state: RwLock<SessionState>,
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    /// Create a session manager, restoring persisted state.
    ///
    /// If the persisted bypass flag reads `"true"`, the persisted identity is
    /// restored; a missing or corrupt identity blob downgrades to the fixed
    /// synthetic developer identity (re-persisted) rather than failing.
    /// Otherwise the session starts unauthenticated, ignoring any stale
    /// identity blob.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let bypass_enabled = store.get(keys::BYPASS_ENABLED).as_deref() == Some("true");

        let identity = if bypass_enabled {
            Some(Self::restore_bypass_identity(&store))
        } else {
            None
        };

        tracing::debug!(bypass_enabled, authenticated = identity.is_some(), "session restored");

        Self {
            state: RwLock::new(SessionState {
                identity,
                bypass_enabled,
            }),
            store,
        }
    }

    fn restore_bypass_identity(store: &Arc<dyn SessionStore>) -> Identity {
        match store.get(keys::MOCK_IDENTITY) {
            Some(raw) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => identity,
                Err(error) => {
                    tracing::warn!(%error, "corrupt persisted identity; using developer identity");
                    let identity = Identity::developer();
                    persist_identity(store, &identity);
                    identity
                }
            },
            None => {
                let identity = Identity::developer();
                persist_identity(store, &identity);
                identity
            }
        }
    }

    /// Authenticate with an email and password.
    ///
    /// Credential verification is an external collaborator's concern; this
    /// core succeeds for any non-empty email and derives the identity from
    /// it. The bypass flag is not altered.
    pub fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        self.login_with_role(email, password, None)
    }

    /// [`login`](Self::login) with an explicitly assigned role instead of
    /// the default [`Role::Admin`].
    pub fn login_with_role(
        &self,
        email: &str,
        _password: &str,
        role: Option<Role>,
    ) -> Result<Identity, SessionError> {
        if email.trim().is_empty() {
            return Err(SessionError::EmptyEmail);
        }

        let identity = Identity::from_login(email, role);

        let mut state = self.write_state();
        state.identity = Some(identity.clone());
        if state.bypass_enabled {
            persist_identity(&self.store, &identity);
        }

        tracing::debug!(email, role = %identity.role, "login");
        Ok(identity)
    }

    /// Clear the current identity.
    ///
    /// Leaves the persisted bypass flag untouched; the persisted identity is
    /// removed only while bypass is disabled, so a bypass session still
    /// restores after a restart.
    pub fn logout(&self) {
        let mut state = self.write_state();
        state.identity = None;
        if !state.bypass_enabled {
            self.store.remove(keys::MOCK_IDENTITY);
        }
        tracing::debug!("logout");
    }

    /// Enable or disable developer bypass mode. Idempotent.
    pub fn set_bypass(&self, enabled: bool) {
        let mut state = self.write_state();
        self.apply_bypass(&mut state, enabled);
    }

    /// Flip bypass mode.
    pub fn toggle_bypass(&self) {
        let mut state = self.write_state();
        let enabled = !state.bypass_enabled;
        self.apply_bypass(&mut state, enabled);
    }

    fn apply_bypass(&self, state: &mut SessionState, enabled: bool) {
        if state.bypass_enabled == enabled {
            return;
        }

        state.bypass_enabled = enabled;
        if enabled {
            let identity = Identity::developer();
            self.store.put(keys::BYPASS_ENABLED, "true".to_string());
            persist_identity(&self.store, &identity);
            state.identity = Some(identity);
        } else {
            // Persist the false value so future starts do not re-enable bypass.
            self.store.put(keys::BYPASS_ENABLED, "false".to_string());
            self.store.remove(keys::MOCK_IDENTITY);
            state.identity = None;
        }

        tracing::debug!(enabled, "bypass mode changed");
    }

    /// The live identity, if any. Pure read.
    pub fn current_identity(&self) -> Option<Identity> {
        self.read_state(|state| state.identity.clone())
    }

    /// True iff an identity is live. Pure read.
    pub fn is_authenticated(&self) -> bool {
        self.read_state(|state| state.identity.is_some())
    }

    /// Current bypass flag. Pure read.
    pub fn bypass_enabled(&self) -> bool {
        self.read_state(|state| state.bypass_enabled)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_state<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        match self.state.read() {
            Ok(state) => f(&state),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }
}

fn persist_identity(store: &Arc<dyn SessionStore>, identity: &Identity) {
    match serde_json::to_string(identity) {
        Ok(json) => store.put(keys::MOCK_IDENTITY, json),
        Err(error) => tracing::warn!(%error, "failed to serialize identity for persistence"),
    }
}
