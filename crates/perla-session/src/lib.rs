//! Invitation Session Orchestration
//!
//! Drives the artifact pipeline for one invitation at a time and holds
//! the surrounding session state the UI consumes.
//!
//! # Architecture
//!
//! - [`SessionController`]: the `Idle -> Rendering -> Ready | Failed`
//!   state machine with stale-result suppression
//! - [`Renderer`] / [`PipelineRenderer`]: the encode-then-compose
//!   pipeline behind an injectable seam
//! - [`InvitationRegistry`]: the in-memory working set of created
//!   invitations
//! - [`LookupService`]: the guard-side scan lookup (stub; no real
//!   backend exists yet)
//! - [`Notice`]: user-facing transient notifications
//!
//! There is no true cancellation of in-flight renders: a render that
//! loses the identity race is simply discarded when it resolves.

#![forbid(unsafe_code)]

mod controller;
mod lookup;
mod notice;
mod registry;
mod render;

pub use controller::{RenderPhase, RenderState, SessionConfig, SessionController};
pub use lookup::{InvitationDetails, LookupConfig, LookupService, LookupStatus};
pub use notice::{copy_notice, download_notice, render_failure_notice, share_notice, Notice, Severity};
pub use registry::InvitationRegistry;
pub use render::{PipelineRenderer, RenderError, Renderer};
