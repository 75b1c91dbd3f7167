use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use buildcrm_auth::{Identity, Role, permissions};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// Optional explicit role assignment; defaults to admin.
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct BypassRequest {
    pub enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct AuthzQuery {
    pub module: String,
    /// Absent means "any action" (module visibility check).
    pub action: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    pub bypass_enabled: bool,
    pub identity: Option<Identity>,
}

#[derive(Debug, Serialize)]
pub struct RoleView {
    pub name: &'static str,
    pub display_name: &'static str,
    /// Module name → allowed actions, sorted for stable output.
    pub grants: BTreeMap<&'static str, Vec<&'static str>>,
}

impl RoleView {
    pub fn for_role(role: Role) -> Self {
        Self {
            name: role.as_str(),
            display_name: role.display_name(),
            grants: permissions::role_grants(role)
                .iter()
                .map(|(module, actions)| (*module, actions.to_vec()))
                .collect(),
        }
    }
}
