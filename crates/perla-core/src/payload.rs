//! Token payload schema
//!
//! The closed record serialized into the barcode. The guard-side scanner
//! deserializes exactly this shape; both sides must agree on it for the
//! system to be useful end-to-end, so it lives here rather than in the
//! encoder crate.

use crate::invitation::{Invitation, InvitationId};
use serde::{Deserialize, Serialize};

/// Identity-relevant invitation fields carried inside the barcode.
///
/// This is a closed record, not free text: the scanner can deserialize
/// it without an external schema. The `guests` field name is part of the
/// wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Invitation identifier
    pub id: InvitationId,
    /// Guest name
    pub name: String,
    /// Companion count
    pub guests: u8,
}

impl TokenPayload {
    /// Serialize to the wire form embedded in the barcode.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a scanned barcode string.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl From<&Invitation> for TokenPayload {
    fn from(invitation: &Invitation) -> Self {
        Self {
            id: invitation.id,
            name: invitation.name.clone(),
            guests: invitation.guest_count,
        }
    }
}
