//! Role→permission resolution against the static grant table.
//!
//! The engine is a two-state machine: `Unauthorized` (no identity) and
//! `Authorized(role)`. Every transition rebuilds an immutable snapshot of
//! `{state, role, permission set}` and swaps it atomically, so readers never
//! observe an old role paired with new permissions.
//!
//! Permission checks are total boolean functions: unknown modules/actions
//! deny, and every check denies while `Unauthorized`. They never error.

use std::sync::{Arc, RwLock};

use crate::identity::Identity;
use crate::permissions::PermissionSet;
use crate::role::Role;

#[derive(Debug)]
struct Snapshot {
    authorized: bool,
    role: Role,
    permissions: PermissionSet,
}

impl Snapshot {
    fn new(authorized: bool, role: Role) -> Self {
        Self {
            authorized,
            role,
            permissions: PermissionSet::for_role(role),
        }
    }
}

/// Deterministic, side-effect-free permission oracle for the current actor.
///
/// Fed identity changes by [`crate::AuthService`] (or directly in tests via
/// [`set_role`](Self::set_role)).
pub struct AuthorizationEngine {
    snapshot: RwLock<Arc<Snapshot>>,
}

impl Default for AuthorizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorizationEngine {
    /// Start `Unauthorized`, with the role defaulting to [`Role::Admin`]
    /// until an identity appears (observed host default; checks still deny
    /// while unauthorized).
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Snapshot::new(false, Role::Admin))),
        }
    }

    /// Observe a session identity change and recompute the snapshot.
    ///
    /// `Some` transitions to `Authorized(identity.role)`; `None` transitions
    /// to `Unauthorized` (the default role remains queryable).
    pub fn on_identity_changed(&self, identity: Option<&Identity>) {
        let snapshot = match identity {
            Some(identity) => Snapshot::new(true, identity.role),
            None => Snapshot::new(false, Role::Admin),
        };
        self.swap(snapshot);
    }

    /// Administrative role override (impersonation tooling, test harnesses).
    ///
    /// Transitions to `Authorized(role)` and recomputes permissions
    /// synchronously.
    pub fn set_role(&self, role: Role) {
        self.swap(Snapshot::new(true, role));
    }

    /// True iff the current role grants `action` on `module`.
    ///
    /// Denies while `Unauthorized` and for any unknown module/action.
    pub fn has_permission(&self, module: &str, action: &str) -> bool {
        let snapshot = self.current();
        snapshot.authorized && snapshot.permissions.allows(module, action)
    }

    /// True iff the current role grants at least one action on `module`.
    ///
    /// Decides whether a module/route is visible at all. Denies while
    /// `Unauthorized`.
    pub fn can_access(&self, module: &str) -> bool {
        let snapshot = self.current();
        snapshot.authorized && snapshot.permissions.grants_module(module)
    }

    /// The current role; [`Role::Admin`] while `Unauthorized`.
    ///
    /// Callers must gate on authentication before trusting this — the
    /// default is a display convenience, not a grant.
    pub fn current_role(&self) -> Role {
        self.current().role
    }

    /// True iff an identity (or role override) is in effect.
    pub fn is_authorized(&self) -> bool {
        self.current().authorized
    }

    fn current(&self) -> Arc<Snapshot> {
        match self.snapshot.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn swap(&self, snapshot: Snapshot) {
        let next = Arc::new(snapshot);
        match self.snapshot.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}
