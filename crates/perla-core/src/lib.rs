//! Perla Core Types
//!
//! Domain types shared across the Perla invitation pipeline.
//!
//! # Architecture
//!
//! This crate is the leaf of the workspace: every other crate consumes it
//! and it consumes none of them. It holds:
//!
//! - The [`Invitation`] record and its validated construction boundary
//! - The [`TokenPayload`] schema shared between the resident-side encoder
//!   and the guard-side scanner
//! - The [`Role`] enumeration supplied by the identity provider
//! - Relative-time formatting for invitation listings
//!
//! Validation happens once, at [`Invitation::new`]. Downstream crates
//! never re-validate; an `Invitation` value is proof the bounds hold.

#![forbid(unsafe_code)]

pub mod invitation;
pub mod payload;
pub mod role;
pub mod timefmt;

pub use invitation::{Invitation, InvitationError, InvitationId};
pub use payload::TokenPayload;
pub use role::Role;
