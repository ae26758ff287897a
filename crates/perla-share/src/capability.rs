//! Capability probing.

use perla_artifact::Artifact;

use crate::host::{HostError, ShareHost};

/// Detected host sharing capabilities for one artifact.
///
/// Always threaded into dispatch calls as a value, never read from
/// ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// A text/link share primitive plus its capability query exist
    pub native_share: bool,
    /// The host additionally accepts this artifact's file type
    pub native_file_share: bool,
}

/// Probe the host for this artifact's sharing capabilities.
///
/// File-share acceptance is environment- and file-type-dependent, so it
/// is re-checked per artifact rather than cached as a static constant.
/// Probing never fails: any error maps to "unsupported".
pub async fn detect(host: &dyn ShareHost, artifact: &Artifact) -> Capabilities {
    let native_share = host.has_share() && host.has_share_query();

    let native_file_share = if native_share {
        let probe_name = format!("invitacion.{}", artifact.format.extension());
        match host.can_share_file(&probe_name, artifact.content_type).await {
            Ok(accepted) => accepted,
            Err(HostError::Unavailable(_)) | Err(HostError::Rejected(_)) | Err(HostError::Io(_)) => {
                tracing::debug!("file-share probe failed, treating as unsupported");
                false
            }
        }
    } else {
        false
    };

    Capabilities {
        native_share,
        native_file_share,
    }
}
