//! Distribution operations.
//!
//! Three independent operations over one invitation and its cached
//! artifact. Each is idempotent with respect to the artifact (repeating
//! it re-sends the same bytes) and none invalidates the artifact for
//! the others.

use perla_artifact::{Artifact, ArtifactFormat};
use perla_core::Invitation;

use crate::capability::Capabilities;
use crate::host::{FileShareRequest, ShareHost, ShareOutcome, TextShareRequest};

/// Error raised by a distribution operation.
///
/// Local to the failing operation; the artifact stays valid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DistributionError {
    /// No sharing mechanism is available in this environment
    #[error("no hay un mecanismo para compartir disponible")]
    Unsupported,

    /// The platform clipboard rejected the image payload
    #[error("el portapapeles no está disponible: {0}")]
    ClipboardUnavailable(String),

    /// The download trigger failed
    #[error("no se pudo guardar la descarga: {0}")]
    WriteFailed(String),
}

/// How a share attempt resolved.
///
/// Cancellation is success-adjacent: the sheet was presented and the
/// user dismissed it, so no failure may be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareDelivery {
    /// Shared with the artifact attached as a file
    File,
    /// Fell back to sharing title + description as text
    TextOnly,
    /// The user dismissed the native share sheet
    Cancelled,
}

/// Share the artifact through the native share sheet.
///
/// Prefers attaching the artifact as a file; if the environment cannot
/// share that payload, falls back to a text-only share of the title and
/// caption; with no share support at all, reports
/// [`DistributionError::Unsupported`].
pub async fn share(
    host: &dyn ShareHost,
    capabilities: Capabilities,
    invitation: &Invitation,
    artifact: &Artifact,
) -> Result<ShareDelivery, DistributionError> {
    if capabilities.native_file_share {
        let file_name = download_file_name(&invitation.name, artifact.format);
        let request = FileShareRequest {
            title: &invitation.title,
            text: &invitation.description,
            file_name: &file_name,
            content_type: artifact.content_type,
            bytes: &artifact.bytes,
        };
        match host.share_file(&request).await {
            Ok(ShareOutcome::Delivered) => {
                tracing::info!(invitation = %invitation.id, "artifact shared as file");
                return Ok(ShareDelivery::File);
            }
            Ok(ShareOutcome::Cancelled) => return Ok(ShareDelivery::Cancelled),
            Err(e) => {
                tracing::debug!(error = %e, "file share refused, trying text-only");
            }
        }
    }

    if capabilities.native_share {
        let request = TextShareRequest {
            title: &invitation.title,
            text: &invitation.description,
        };
        match host.share_text(&request).await {
            Ok(ShareOutcome::Delivered) => {
                tracing::info!(invitation = %invitation.id, "shared as text");
                Ok(ShareDelivery::TextOnly)
            }
            Ok(ShareOutcome::Cancelled) => Ok(ShareDelivery::Cancelled),
            Err(e) => {
                tracing::debug!(error = %e, "text share refused");
                Err(DistributionError::Unsupported)
            }
        }
    } else {
        Err(DistributionError::Unsupported)
    }
}

/// Copy the artifact's bytes to the system clipboard as an image.
pub async fn copy(
    host: &dyn ShareHost,
    invitation: &Invitation,
    artifact: &Artifact,
) -> Result<(), DistributionError> {
    host.copy_image(artifact.content_type, &artifact.bytes)
        .await
        .map_err(|e| DistributionError::ClipboardUnavailable(e.to_string()))?;
    tracing::info!(invitation = %invitation.id, "artifact copied to clipboard");
    Ok(())
}

/// Save the artifact as a local download.
///
/// The filename derives deterministically from the invitation name; the
/// host releases its transient write resource on every exit path.
pub async fn download(
    host: &dyn ShareHost,
    invitation: &Invitation,
    artifact: &Artifact,
) -> Result<std::path::PathBuf, DistributionError> {
    let file_name = download_file_name(&invitation.name, artifact.format);
    let path = host
        .save_download(&file_name, &artifact.bytes)
        .await
        .map_err(|e| DistributionError::WriteFailed(e.to_string()))?;
    tracing::info!(invitation = %invitation.id, path = %path.display(), "artifact downloaded");
    Ok(path)
}

/// Derive the download filename for an invitation name: lower-cased,
/// whitespace collapsed to single dashes, plus the format extension.
pub fn download_file_name(name: &str, format: ArtifactFormat) -> String {
    let stem: String = name
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    if stem.is_empty() {
        // Names are validated non-empty upstream; keep a fixed fallback
        // rather than emitting a bare extension.
        return format!("invitacion.{}", format.extension());
    }
    format!("{}.{}", stem, format.extension())
}
