//! User-facing transient notifications.
//!
//! Distribution outcomes map to notices per operation; the one rule
//! that must hold everywhere: a user-cancelled share produces no
//! notice at all, success or failure.

use perla_share::{DistributionError, ShareDelivery};
use std::path::Path;

/// Notice severity, matching the toast styles the UI renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Confirmation toast
    Info,
    /// Failure toast
    Error,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Display severity
    pub severity: Severity,
    /// Short headline
    pub title: String,
    /// Optional detail line
    pub description: Option<String>,
}

impl Notice {
    /// Build an info notice.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    /// Build an error notice.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }
}

/// Notice for a share attempt, or `None` when the user cancelled.
pub fn share_notice(result: &Result<ShareDelivery, DistributionError>) -> Option<Notice> {
    match result {
        Ok(ShareDelivery::File) | Ok(ShareDelivery::TextOnly) => Some(Notice::info(
            "Invitación compartida",
            "Se ha compartido la invitación exitosamente.",
        )),
        Ok(ShareDelivery::Cancelled) => None,
        Err(e) => Some(Notice::error("No se pudo compartir", e.to_string())),
    }
}

/// Notice for a clipboard copy attempt.
pub fn copy_notice(result: &Result<(), DistributionError>) -> Notice {
    match result {
        Ok(()) => Notice::info(
            "Imagen copiada",
            "La invitación se ha copiado al portapapeles.",
        ),
        Err(e) => Notice::error("No se pudo copiar", e.to_string()),
    }
}

/// Notice for a download attempt.
pub fn download_notice(result: &Result<std::path::PathBuf, DistributionError>) -> Notice {
    match result {
        Ok(path) => Notice::info(
            "Invitación descargada",
            format!("Guardada como {}.", display_name(path)),
        ),
        Err(e) => Notice::error("No se pudo descargar", e.to_string()),
    }
}

/// The single generic notice for any render failure.
///
/// Recovery is re-triggering a render (e.g. recreating the invitation);
/// there is no retry button, so the message stays generic.
pub fn render_failure_notice() -> Notice {
    Notice::error(
        "No se pudo generar la invitación",
        "Inténtalo de nuevo creando la invitación otra vez.",
    )
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cancelled_share_is_silent() {
        assert_eq!(share_notice(&Ok(ShareDelivery::Cancelled)), None);
    }

    #[test]
    fn test_delivered_share_notices() {
        for delivery in [ShareDelivery::File, ShareDelivery::TextOnly] {
            let notice = share_notice(&Ok(delivery)).unwrap();
            assert_eq!(notice.severity, Severity::Info);
        }
    }

    #[test]
    fn test_failed_share_is_error() {
        let notice = share_notice(&Err(DistributionError::Unsupported)).unwrap();
        assert_eq!(notice.severity, Severity::Error);
    }

    #[test]
    fn test_copy_notices() {
        assert_eq!(copy_notice(&Ok(())).severity, Severity::Info);
        let err = DistributionError::ClipboardUnavailable("x".into());
        assert_eq!(copy_notice(&Err(err)).severity, Severity::Error);
    }

    #[test]
    fn test_download_notice_names_file() {
        let notice = download_notice(&Ok(PathBuf::from("/tmp/ana-torres.png")));
        assert!(notice.description.unwrap().contains("ana-torres.png"));
    }
}
