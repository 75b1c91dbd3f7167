//! The single auth facade consumed by screens and route guards.
//!
//! [`AuthService`] composes one [`SessionManager`] and one
//! [`AuthorizationEngine`] and keeps the engine in sync with identity
//! changes. It is constructed explicitly at process start and passed to
//! callers — no ambient globals.

use std::sync::{Arc, Mutex};

use crate::engine::AuthorizationEngine;
use crate::identity::Identity;
use crate::role::Role;
use crate::session::{SessionError, SessionManager};
use crate::store::SessionStore;

/// Session + authorization contract for the rest of the application.
pub struct AuthService {
    session: SessionManager,
    engine: AuthorizationEngine,
    /// Serializes mutations so the session state and the engine snapshot
    /// change as one logical step. Reads bypass this lock entirely.
    mutate: Mutex<()>,
}

impl AuthService {
    /// Build the service, restoring persisted session state and priming the
    /// engine from whatever identity was restored.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let session = SessionManager::new(store);
        let engine = AuthorizationEngine::new();
        engine.on_identity_changed(session.current_identity().as_ref());

        Self {
            session,
            engine,
            mutate: Mutex::new(()),
        }
    }

    // ── session ─────────────────────────────────────────────────────────

    pub fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        self.login_with_role(email, password, None)
    }

    pub fn login_with_role(
        &self,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<Identity, SessionError> {
        let _guard = self.mutation_guard();
        let identity = self.session.login_with_role(email, password, role)?;
        self.engine.on_identity_changed(Some(&identity));
        Ok(identity)
    }

    pub fn logout(&self) {
        let _guard = self.mutation_guard();
        self.session.logout();
        self.engine.on_identity_changed(None);
    }

    pub fn set_bypass(&self, enabled: bool) {
        let _guard = self.mutation_guard();
        self.session.set_bypass(enabled);
        self.engine
            .on_identity_changed(self.session.current_identity().as_ref());
    }

    pub fn toggle_bypass(&self) {
        let _guard = self.mutation_guard();
        self.session.toggle_bypass();
        self.engine
            .on_identity_changed(self.session.current_identity().as_ref());
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.session.current_identity()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn bypass_enabled(&self) -> bool {
        self.session.bypass_enabled()
    }

    // ── authorization ───────────────────────────────────────────────────

    pub fn has_permission(&self, module: &str, action: &str) -> bool {
        self.engine.has_permission(module, action)
    }

    pub fn can_access(&self, module: &str) -> bool {
        self.engine.can_access(module)
    }

    pub fn current_role(&self) -> Role {
        self.engine.current_role()
    }

    /// Administrative role override; see [`AuthorizationEngine::set_role`].
    pub fn set_role(&self, role: Role) {
        let _guard = self.mutation_guard();
        self.engine.set_role(role);
    }

    pub fn all_roles(&self) -> &'static [Role] {
        &Role::ALL
    }

    pub fn role_display_name(&self, role: Role) -> &'static str {
        role.display_name()
    }

    fn mutation_guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.mutate.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemorySessionStore, keys};

    fn service() -> (AuthService, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        let service = AuthService::new(store.clone() as Arc<dyn SessionStore>);
        (service, store)
    }

    // Fresh process, no persisted state. The role defaults to admin, so
    // route visibility must be gated on is_authenticated() at the call
    // site rather than inferred from the role alone.
    #[test]
    fn fresh_process_requires_authentication_gate() {
        let (service, _) = service();
        assert!(!service.is_authenticated());
        assert_eq!(service.current_role(), Role::Admin);
        assert!(!service.has_permission("dashboard", "view"));
    }

    #[test]
    fn login_grants_admin_permissions() {
        let (service, _) = service();
        let identity = service.login("jane@acme.com", "x").unwrap();

        assert_eq!(identity.display_name, "jane");
        assert_eq!(identity.role, Role::Admin);
        assert!(service.is_authenticated());
        assert!(service.has_permission("financial", "edit"));
        assert!(!service.has_permission("financial", "approve"));
    }

    #[test]
    fn role_override_swaps_permission_set() {
        let (service, _) = service();

        service.set_role(Role::Owner);
        assert!(service.has_permission("financial", "approve"));

        service.set_role(Role::Subcontractor);
        assert!(!service.has_permission("financial", "approve"));
        assert!(!service.can_access("financial"));
    }

    #[test]
    fn bypass_flag_survives_logout() {
        let (service, store) = service();

        service.set_bypass(true);
        assert!(service.is_authenticated());
        assert!(service.current_identity().unwrap().is_developer());

        service.logout();
        assert!(!service.is_authenticated());
        assert!(!service.has_permission("dashboard", "view"));
        assert_eq!(store.get(keys::BYPASS_ENABLED).as_deref(), Some("true"));
    }

    #[test]
    fn disabling_bypass_removes_persisted_identity() {
        let (service, store) = service();

        service.set_bypass(true);
        service.set_bypass(false);

        assert!(!service.is_authenticated());
        assert_eq!(store.get(keys::MOCK_IDENTITY), None);
    }

    #[test]
    fn restart_restores_bypass_session_and_permissions() {
        let store = Arc::new(InMemorySessionStore::new());
        let service = AuthService::new(store.clone() as Arc<dyn SessionStore>);
        service.set_bypass(true);
        let before = service.current_identity().unwrap();
        drop(service);

        let restarted = AuthService::new(store as Arc<dyn SessionStore>);
        assert!(restarted.is_authenticated());
        assert_eq!(restarted.current_identity(), Some(before));
        // Engine is primed from the restored identity, not left unauthorized.
        assert!(restarted.has_permission("dashboard", "view"));
    }

    #[test]
    fn logout_revokes_engine_authorization() {
        let (service, _) = service();
        service.login("jane@acme.com", "x").unwrap();
        assert!(service.can_access("dashboard"));

        service.logout();
        assert!(!service.can_access("dashboard"));
        assert_eq!(service.current_role(), Role::Admin);
    }

    #[test]
    fn login_with_role_authorizes_that_role() {
        let (service, _) = service();
        let identity = service
            .login_with_role("pat@acme.com", "x", Some(Role::SalesRep))
            .unwrap();

        assert_eq!(identity.role, Role::SalesRep);
        assert_eq!(service.current_role(), Role::SalesRep);
        assert!(service.has_permission("clients", "create"));
        assert!(!service.can_access("hr"));
    }

    #[test]
    fn role_catalogue_is_complete() {
        let (service, _) = service();
        let roles = service.all_roles();
        assert_eq!(roles.len(), 6);
        assert_eq!(service.role_display_name(Role::FieldWorker), "Field Worker");
    }
}
