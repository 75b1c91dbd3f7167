//! The authenticated actor's descriptive record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use buildcrm_core::IdentityId;

use crate::role::Role;

/// Fixed id of the synthetic developer identity used by bypass mode.
const DEV_IDENTITY_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_7000_8000_0000_0000_0d37);

/// The current actor: who is logged in, under which role.
///
/// At most one `Identity` is live per session. Created by a successful login
/// or by enabling developer bypass; destroyed by logout or by disabling
/// bypass. Serialized as-is into the persisted `mock_identity` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    /// Opaque reference to a presentation asset; no meaning to this core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub authenticated_at: DateTime<Utc>,
}

impl Identity {
    /// Derive an identity from a login email.
    ///
    /// The display name is the local part of the email; the role defaults to
    /// [`Role::Admin`] unless the caller supplies one.
    pub fn from_login(email: &str, role: Option<Role>) -> Self {
        let local_part = email.split('@').next().unwrap_or(email);
        Self {
            id: IdentityId::new(),
            display_name: local_part.to_string(),
            email: email.to_string(),
            role: role.unwrap_or(Role::Admin),
            avatar_url: None,
            authenticated_at: Utc::now(),
        }
    }

    /// The fixed synthetic developer identity used while bypass is enabled.
    pub fn developer() -> Self {
        Self {
            id: IdentityId::from_uuid(DEV_IDENTITY_ID),
            display_name: "Dev User".to_string(),
            email: "dev@buildcrm.local".to_string(),
            role: Role::Admin,
            avatar_url: None,
            authenticated_at: Utc::now(),
        }
    }

    /// True for the synthetic developer identity (regardless of timestamps).
    pub fn is_developer(&self) -> bool {
        *self.id.as_uuid() == DEV_IDENTITY_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_identity_derives_display_name_from_local_part() {
        let identity = Identity::from_login("jane@acme.com", None);
        assert_eq!(identity.display_name, "jane");
        assert_eq!(identity.email, "jane@acme.com");
        assert_eq!(identity.role, Role::Admin);
        assert!(identity.avatar_url.is_none());
    }

    #[test]
    fn login_identity_without_at_sign_uses_whole_email() {
        let identity = Identity::from_login("jane", None);
        assert_eq!(identity.display_name, "jane");
    }

    #[test]
    fn supplied_role_overrides_default() {
        let identity = Identity::from_login("bob@acme.com", Some(Role::FieldWorker));
        assert_eq!(identity.role, Role::FieldWorker);
    }

    #[test]
    fn developer_identity_has_a_fixed_id() {
        let a = Identity::developer();
        let b = Identity::developer();
        assert_eq!(a.id, b.id);
        assert!(a.is_developer());
        assert_eq!(a.role, Role::Admin);
    }

    #[test]
    fn serde_round_trip() {
        let identity = Identity::from_login("jane@acme.com", Some(Role::Manager));
        let json = serde_json::to_string(&identity).unwrap();
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identity);
    }
}
