//! Host environment seam.
//!
//! Everything platform-specific about sharing lives behind this trait:
//! the native share sheet, its capability query, the clipboard, and the
//! download sink. [`crate::MockShareHost`] scripts outcomes for tests;
//! [`crate::DesktopShareHost`] is the real desktop implementation.

use async_trait::async_trait;
use std::path::PathBuf;

/// A native share request carrying the artifact as an attached file.
#[derive(Debug, Clone)]
pub struct FileShareRequest<'a> {
    /// Share sheet title
    pub title: &'a str,
    /// Accompanying text
    pub text: &'a str,
    /// Suggested filename for the attachment
    pub file_name: &'a str,
    /// MIME type of the attachment
    pub content_type: &'a str,
    /// Attachment bytes
    pub bytes: &'a [u8],
}

/// A native text-only share request.
#[derive(Debug, Clone)]
pub struct TextShareRequest<'a> {
    /// Share sheet title
    pub title: &'a str,
    /// Shared text
    pub text: &'a str,
}

/// Resolution of a share attempt the host actually presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The user completed the share
    Delivered,
    /// The user dismissed the share sheet
    Cancelled,
}

/// Failure inside a host primitive.
///
/// The dispatcher translates these into its own error taxonomy; hosts
/// never decide user-facing semantics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The primitive does not exist in this environment
    #[error("host primitive unavailable: {0}")]
    Unavailable(String),

    /// The primitive exists but rejected the payload
    #[error("host rejected payload: {0}")]
    Rejected(String),

    /// I/O failure while persisting or transferring
    #[error("host I/O failure: {0}")]
    Io(String),
}

/// Platform primitives for distributing an artifact.
#[async_trait]
pub trait ShareHost: Send + Sync {
    /// Whether a "share text/link" primitive exists at all.
    fn has_share(&self) -> bool;

    /// Whether the capability-query primitive exists.
    fn has_share_query(&self) -> bool;

    /// Capability query: would the host accept a file of this name and
    /// type? Only meaningful when [`has_share_query`](Self::has_share_query)
    /// is true.
    async fn can_share_file(&self, file_name: &str, content_type: &str)
        -> Result<bool, HostError>;

    /// Present the native share sheet with an attached file.
    async fn share_file(&self, request: &FileShareRequest<'_>) -> Result<ShareOutcome, HostError>;

    /// Present the native share sheet with text only.
    async fn share_text(&self, request: &TextShareRequest<'_>) -> Result<ShareOutcome, HostError>;

    /// Write an encoded image to the system clipboard.
    async fn copy_image(&self, content_type: &str, bytes: &[u8]) -> Result<(), HostError>;

    /// Persist bytes as a user-visible download; returns the final path.
    async fn save_download(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, HostError>;
}
