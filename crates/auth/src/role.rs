//! Role enumeration used for RBAC.
//!
//! Roles are a closed set: an unknown role name is a parse error, never a
//! silent "no permissions" runtime state.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use buildcrm_core::DomainError;

/// One of the six fixed role categories an actor can hold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Admin,
    Manager,
    FieldWorker,
    SalesRep,
    Subcontractor,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 6] = [
        Role::Owner,
        Role::Admin,
        Role::Manager,
        Role::FieldWorker,
        Role::SalesRep,
        Role::Subcontractor,
    ];

    /// Stable machine-readable name (matches the serde encoding).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::FieldWorker => "field_worker",
            Role::SalesRep => "sales_rep",
            Role::Subcontractor => "subcontractor",
        }
    }

    /// Human-readable name for display surfaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::FieldWorker => "Field Worker",
            Role::SalesRep => "Sales Rep",
            Role::Subcontractor => "Subcontractor",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "field_worker" => Ok(Role::FieldWorker),
            "sales_rep" => Ok(Role::SalesRep),
            "subcontractor" => Ok(Role::Subcontractor),
            other => Err(DomainError::invalid_id(format!("unknown role: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_a_parse_error() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn serde_encoding_matches_as_str() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(Role::FieldWorker.display_name(), "Field Worker");
        assert_eq!(Role::SalesRep.display_name(), "Sales Rep");
        assert_eq!(Role::Owner.display_name(), "Owner");
    }
}
