//! Invitation record and construction boundary
//!
//! An [`Invitation`] is the unit of work for the whole pipeline. Input
//! bounds (name length, companion count) are enforced here, at
//! construction, and nowhere else: invalid input never reaches the
//! encoder or the compositor.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Fixed community name stamped on every invitation artifact.
pub const FIXED_TITLE: &str = "Jardines de La Perla";

/// Fixed footer caption stamped on every invitation artifact.
pub const FIXED_DESCRIPTION: &str = "código de invitación";

/// Minimum guest name length after trimming.
pub const NAME_MIN_LEN: usize = 2;

/// Maximum guest name length after trimming.
pub const NAME_MAX_LEN: usize = 50;

/// Maximum companion count per invitation.
pub const GUEST_COUNT_MAX: u8 = 10;

/// Opaque unique identifier for an invitation.
///
/// Generated at creation, immutable, and used as the dedup key for the
/// in-memory registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvitationId(Uuid);

impl InvitationId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InvitationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InvitationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for InvitationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Error raised when invitation input violates its bounds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvitationError {
    /// Name missing or shorter than [`NAME_MIN_LEN`] after trimming
    #[error("el nombre debe tener al menos {NAME_MIN_LEN} caracteres")]
    NameTooShort,

    /// Name longer than [`NAME_MAX_LEN`] after trimming
    #[error("el nombre no puede tener más de {NAME_MAX_LEN} caracteres")]
    NameTooLong,

    /// Companion count above [`GUEST_COUNT_MAX`]
    #[error("no se permiten más de {GUEST_COUNT_MAX} acompañantes")]
    TooManyGuests {
        /// The rejected count
        requested: u8,
    },
}

/// A resident-authored record describing one guest admission request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Unique identifier, immutable after creation
    pub id: InvitationId,
    /// Guest name as entered by the resident
    pub name: String,
    /// Companion count, 0..=10
    pub guest_count: u8,
    /// Reserved flag; captured but consumed by no downstream logic
    pub is_frequent: bool,
    /// Community name (fixed for the current deployment)
    pub title: String,
    /// Footer caption (fixed for the current deployment)
    pub description: String,
    /// Creation timestamp, display-only
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Invitation {
    /// Construct a validated invitation.
    ///
    /// The name is trimmed before the length check; counts above
    /// [`GUEST_COUNT_MAX`] are rejected. This is the only place the
    /// bounds are enforced.
    pub fn new(
        name: impl Into<String>,
        guest_count: u8,
        is_frequent: bool,
    ) -> Result<Self, InvitationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.chars().count() < NAME_MIN_LEN {
            return Err(InvitationError::NameTooShort);
        }
        if trimmed.chars().count() > NAME_MAX_LEN {
            return Err(InvitationError::NameTooLong);
        }
        if guest_count > GUEST_COUNT_MAX {
            return Err(InvitationError::TooManyGuests {
                requested: guest_count,
            });
        }

        Ok(Self {
            id: InvitationId::new(),
            name: trimmed.to_string(),
            guest_count,
            is_frequent,
            title: FIXED_TITLE.to_string(),
            description: FIXED_DESCRIPTION.to_string(),
            created_at: OffsetDateTime::now_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_invitation() {
        let inv = Invitation::new("Ana Torres", 3, false).unwrap();
        assert_eq!(inv.name, "Ana Torres");
        assert_eq!(inv.guest_count, 3);
        assert!(!inv.is_frequent);
        assert_eq!(inv.title, FIXED_TITLE);
        assert_eq!(inv.description, FIXED_DESCRIPTION);
    }

    #[test]
    fn test_name_is_trimmed() {
        let inv = Invitation::new("  Ana Torres  ", 0, false).unwrap();
        assert_eq!(inv.name, "Ana Torres");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            Invitation::new("", 0, false),
            Err(InvitationError::NameTooShort)
        );
        assert_eq!(
            Invitation::new("   ", 0, false),
            Err(InvitationError::NameTooShort)
        );
    }

    #[test]
    fn test_single_char_name_rejected() {
        assert_eq!(
            Invitation::new("A", 0, false),
            Err(InvitationError::NameTooShort)
        );
    }

    #[test]
    fn test_overlong_name_rejected() {
        let name = "x".repeat(NAME_MAX_LEN + 1);
        assert_eq!(
            Invitation::new(name, 0, false),
            Err(InvitationError::NameTooLong)
        );
    }

    #[test]
    fn test_name_at_bounds_accepted() {
        assert!(Invitation::new("Al", 0, false).is_ok());
        assert!(Invitation::new("x".repeat(NAME_MAX_LEN), 0, false).is_ok());
    }

    #[test]
    fn test_guest_count_eleven_rejected() {
        assert_eq!(
            Invitation::new("Ana Torres", 11, false),
            Err(InvitationError::TooManyGuests { requested: 11 })
        );
    }

    #[test]
    fn test_guest_count_at_bounds_accepted() {
        assert!(Invitation::new("Ana Torres", 0, false).is_ok());
        assert!(Invitation::new("Ana Torres", GUEST_COUNT_MAX, false).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Invitation::new("Ana Torres", 1, false).unwrap();
        let b = Invitation::new("Ana Torres", 1, false).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_id_roundtrips_through_display() {
        let id = InvitationId::new();
        let parsed: InvitationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_valid_input_always_constructs(
                name in "[a-zA-Záéíóúñ]{1}[a-zA-Záéíóúñ ]{1,48}[a-zA-Záéíóúñ]{0,1}",
                guests in 0u8..=GUEST_COUNT_MAX,
            ) {
                prop_assume!(name.trim().chars().count() >= NAME_MIN_LEN);
                let inv = Invitation::new(name, guests, false).unwrap();
                prop_assert_eq!(inv.guest_count, guests);
                prop_assert!(inv.name.chars().count() <= NAME_MAX_LEN);
            }

            #[test]
            fn prop_out_of_range_guests_never_construct(guests in 11u8..) {
                prop_assert!(Invitation::new("Ana Torres", guests, false).is_err());
            }
        }
    }
}
