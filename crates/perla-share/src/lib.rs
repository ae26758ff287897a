//! Capability Detector and Distribution Dispatcher
//!
//! Makes a rendered invitation artifact available outside the
//! application through one of three independent mechanisms: native
//! share, clipboard copy, or local download.
//!
//! # Architecture
//!
//! The host environment sits behind the [`ShareHost`] trait; dispatch
//! decisions consume an explicit [`Capabilities`] value produced by
//! [`detect`] rather than ambient globals, so every path is testable
//! with injected capabilities:
//!
//! ```text
//! ┌───────────┐   detect()   ┌──────────────┐
//! │ ShareHost │ ───────────> │ Capabilities │
//! └─────┬─────┘              └──────┬───────┘
//!       │   share()/copy()/download()
//!       └──────────────┬────────────┘
//!                      v
//!            per-operation Result
//! ```
//!
//! Fallback is deterministic: file share → text-only share →
//! `Unsupported`. A user cancelling the native share sheet is a
//! success-adjacent outcome, never an error. A failure in one
//! operation leaves the cached artifact untouched for the others.

#![forbid(unsafe_code)]

mod capability;
mod desktop;
mod dispatch;
mod host;
mod mock;

pub use capability::{detect, Capabilities};
pub use desktop::DesktopShareHost;
pub use dispatch::{copy, download, download_file_name, share, DistributionError, ShareDelivery};
pub use host::{FileShareRequest, HostError, ShareHost, ShareOutcome, TextShareRequest};
pub use mock::{HostCall, MockShareHost};
