//! Static role→permission grant table and the queryable [`PermissionSet`].
//!
//! The table is fixed at compile time; it is the single authoritative source
//! for what each role may do. Queries are total boolean functions: an unknown
//! module or action denies, it never errors (fail-closed policy).

use std::collections::HashMap;

use crate::role::Role;

/// Grants for one module: the module name and its allowed actions.
pub type ModuleGrant = (&'static str, &'static [&'static str]);

const OWNER_GRANTS: &[ModuleGrant] = &[
    ("dashboard", &["view", "edit", "delete", "create"]),
    ("projects", &["view", "edit", "delete", "create", "assign"]),
    ("clients", &["view", "edit", "delete", "create"]),
    ("hr", &["view", "edit", "delete", "create", "hire", "fire"]),
    ("financial", &["view", "edit", "delete", "create", "approve"]),
    ("meetings", &["view", "edit", "delete", "create", "host"]),
    ("admin", &["view", "edit", "delete", "create", "manage"]),
    ("reports", &["view", "edit", "delete", "create", "export"]),
    ("settings", &["view", "edit", "delete", "create"]),
];

const ADMIN_GRANTS: &[ModuleGrant] = &[
    ("dashboard", &["view", "edit", "create"]),
    ("projects", &["view", "edit", "delete", "create", "assign"]),
    ("clients", &["view", "edit", "delete", "create"]),
    ("hr", &["view", "edit", "create"]),
    ("financial", &["view", "edit", "create"]),
    ("meetings", &["view", "edit", "delete", "create", "host"]),
    ("reports", &["view", "edit", "create", "export"]),
    ("settings", &["view", "edit"]),
];

const MANAGER_GRANTS: &[ModuleGrant] = &[
    ("dashboard", &["view"]),
    ("projects", &["view", "edit", "create", "assign"]),
    ("clients", &["view", "edit", "create"]),
    ("hr", &["view", "edit"]),
    ("financial", &["view"]),
    ("meetings", &["view", "edit", "create", "host"]),
    ("reports", &["view", "create"]),
];

const FIELD_WORKER_GRANTS: &[ModuleGrant] = &[
    ("dashboard", &["view"]),
    ("projects", &["view", "edit"]),
    ("meetings", &["view", "create"]),
    ("reports", &["view"]),
];

const SALES_REP_GRANTS: &[ModuleGrant] = &[
    ("dashboard", &["view"]),
    ("clients", &["view", "edit", "create"]),
    ("projects", &["view", "create"]),
    ("meetings", &["view", "edit", "create", "host"]),
    ("reports", &["view", "create"]),
];

const SUBCONTRACTOR_GRANTS: &[ModuleGrant] = &[
    ("dashboard", &["view"]),
    ("projects", &["view"]),
    ("meetings", &["view"]),
];

/// Grant rows for a role. A module absent from a role's row denies everything.
pub fn role_grants(role: Role) -> &'static [ModuleGrant] {
    match role {
        Role::Owner => OWNER_GRANTS,
        Role::Admin => ADMIN_GRANTS,
        Role::Manager => MANAGER_GRANTS,
        Role::FieldWorker => FIELD_WORKER_GRANTS,
        Role::SalesRep => SALES_REP_GRANTS,
        Role::Subcontractor => SUBCONTRACTOR_GRANTS,
    }
}

/// The resolved permissions for one role, indexed for constant-time queries.
///
/// Always derived from the static table via [`PermissionSet::for_role`] —
/// never mutated independently of the role it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    modules: HashMap<&'static str, &'static [&'static str]>,
}

impl PermissionSet {
    /// Build the permission set for a role from the static table.
    pub fn for_role(role: Role) -> Self {
        Self {
            modules: role_grants(role).iter().copied().collect(),
        }
    }

    /// An empty set that denies everything.
    pub fn empty() -> Self {
        Self {
            modules: HashMap::new(),
        }
    }

    /// True iff `module` is granted and its action list contains `action`.
    pub fn allows(&self, module: &str, action: &str) -> bool {
        self.modules
            .get(module)
            .is_some_and(|actions| actions.iter().any(|a| *a == action))
    }

    /// True iff `module` is granted with at least one allowed action.
    pub fn grants_module(&self, module: &str) -> bool {
        self.modules
            .get(module)
            .is_some_and(|actions| !actions.is_empty())
    }

    /// Granted module names (order unspecified).
    pub fn modules(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.keys().copied()
    }
}
