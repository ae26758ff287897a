//! Desktop host implementation.
//!
//! Desktops have no native share sheet, so both share primitives report
//! absent and dispatch falls through to clipboard and download. The
//! clipboard write goes through `arboard`; downloads are written via a
//! scoped temporary file that is persisted into place on success and
//! deleted on every other path.

use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;

use crate::host::{
    FileShareRequest, HostError, ShareHost, ShareOutcome, TextShareRequest,
};

/// Host backed by the desktop clipboard and filesystem.
#[derive(Debug, Clone)]
pub struct DesktopShareHost {
    download_dir: PathBuf,
}

impl DesktopShareHost {
    /// Create a host that saves downloads under `download_dir`.
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
        }
    }

    /// Directory downloads are saved to.
    pub fn download_dir(&self) -> &PathBuf {
        &self.download_dir
    }
}

#[async_trait]
impl ShareHost for DesktopShareHost {
    fn has_share(&self) -> bool {
        false
    }

    fn has_share_query(&self) -> bool {
        false
    }

    async fn can_share_file(
        &self,
        _file_name: &str,
        _content_type: &str,
    ) -> Result<bool, HostError> {
        Ok(false)
    }

    async fn share_file(&self, _request: &FileShareRequest<'_>) -> Result<ShareOutcome, HostError> {
        Err(HostError::Unavailable("no native share sheet".into()))
    }

    async fn share_text(&self, _request: &TextShareRequest<'_>) -> Result<ShareOutcome, HostError> {
        Err(HostError::Unavailable("no native share sheet".into()))
    }

    async fn copy_image(&self, _content_type: &str, bytes: &[u8]) -> Result<(), HostError> {
        // The clipboard wants raw RGBA, not an encoded container.
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| HostError::Rejected(format!("undecodable image payload: {}", e)))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        let raw = decoded.into_raw();

        // arboard clipboards are not Send on every platform; open one
        // inside the blocking closure per call.
        tokio::task::spawn_blocking(move || {
            let mut clipboard =
                arboard::Clipboard::new().map_err(|e| HostError::Rejected(e.to_string()))?;
            clipboard
                .set_image(arboard::ImageData {
                    width: width as usize,
                    height: height as usize,
                    bytes: raw.into(),
                })
                .map_err(|e| HostError::Rejected(e.to_string()))
        })
        .await
        .map_err(|e| HostError::Io(e.to_string()))?
    }

    async fn save_download(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, HostError> {
        let dir = self.download_dir.clone();
        let file_name = file_name.to_string();
        let bytes = bytes.to_vec();

        tokio::task::spawn_blocking(move || {
            std::fs::create_dir_all(&dir).map_err(|e| HostError::Io(e.to_string()))?;

            // Scoped transient resource: the temp file exists only for
            // the duration of the write and is removed on every failure
            // path when the guard drops.
            let mut tmp =
                tempfile::NamedTempFile::new_in(&dir).map_err(|e| HostError::Io(e.to_string()))?;
            tmp.write_all(&bytes).map_err(|e| HostError::Io(e.to_string()))?;
            tmp.flush().map_err(|e| HostError::Io(e.to_string()))?;

            let target = dir.join(&file_name);
            tmp.persist(&target)
                .map_err(|e| HostError::Io(e.to_string()))?;
            Ok(target)
        })
        .await
        .map_err(|e| HostError::Io(e.to_string()))?
    }
}
