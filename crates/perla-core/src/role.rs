//! Community roles
//!
//! Supplied by the external identity provider as a claim string and
//! consumed read-only by navigation filtering. Unknown or missing claims
//! resolve to [`Role::NotAssigned`].

use serde::{Deserialize, Serialize};

/// Closed role enumeration for community members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Community administrator
    Admin,
    /// Resident who creates invitations
    Resident,
    /// Gate guard who validates invitations
    Watchman,
    /// No role claim present
    NotAssigned,
}

impl Role {
    /// Resolve a role from an identity-provider claim.
    ///
    /// Anything unrecognized (including an absent claim) is
    /// `NotAssigned` rather than an error.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some("admin") => Role::Admin,
            Some("resident") => Role::Resident,
            Some("watchman") => Role::Watchman,
            _ => Role::NotAssigned,
        }
    }

    /// Claim string for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Resident => "resident",
            Role::Watchman => "watchman",
            Role::NotAssigned => "not-assigned",
        }
    }

    /// Whether this role may create invitations.
    pub fn can_invite(&self) -> bool {
        matches!(self, Role::Admin | Role::Resident)
    }

    /// Whether this role may validate invitations at the gate.
    pub fn can_validate(&self) -> bool {
        matches!(self, Role::Admin | Role::Watchman)
    }
}
