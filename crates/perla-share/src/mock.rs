//! Scriptable host for tests.
//!
//! Mirrors the real host method-for-method and records every call so
//! tests can assert on dispatch behavior (which fallback ran, what was
//! written where) without touching platform facilities.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::host::{
    FileShareRequest, HostError, ShareHost, ShareOutcome, TextShareRequest,
};

/// One recorded host interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// Capability query for a file payload
    CanShareFile {
        /// Probed filename
        file_name: String,
        /// Probed MIME type
        content_type: String,
    },
    /// Native share with attachment
    ShareFile {
        /// Attachment filename
        file_name: String,
    },
    /// Native text-only share
    ShareText {
        /// Shared title
        title: String,
    },
    /// Clipboard image write
    CopyImage {
        /// Payload size in bytes
        len: usize,
    },
    /// Download persisted
    SaveDownload {
        /// Target filename
        file_name: String,
    },
}

/// Test double with scriptable capabilities and outcomes.
#[derive(Debug, Clone)]
pub struct MockShareHost {
    has_share: bool,
    has_share_query: bool,
    accepts_files: bool,
    probe_fails: bool,
    cancel_shares: bool,
    clipboard_fails: bool,
    downloads_fail: bool,
    calls: Arc<Mutex<Vec<HostCall>>>,
    downloads: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockShareHost {
    fn new(has_share: bool, has_share_query: bool, accepts_files: bool) -> Self {
        Self {
            has_share,
            has_share_query,
            accepts_files,
            probe_fails: false,
            cancel_shares: false,
            clipboard_fails: false,
            downloads_fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
            downloads: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Host supporting native share including file payloads.
    pub fn full() -> Self {
        Self::new(true, true, true)
    }

    /// Host with native share but no file-payload acceptance.
    pub fn text_only() -> Self {
        Self::new(true, true, false)
    }

    /// Host with no native share at all.
    pub fn unsupported() -> Self {
        Self::new(false, false, false)
    }

    /// Make the capability query error out.
    pub fn with_probe_failure(mut self) -> Self {
        self.probe_fails = true;
        self
    }

    /// Drop the capability-query primitive while keeping share itself.
    pub fn without_share_query(mut self) -> Self {
        self.has_share_query = false;
        self
    }

    /// Every presented share sheet gets dismissed by the user.
    pub fn with_cancelled_shares(mut self) -> Self {
        self.cancel_shares = true;
        self
    }

    /// Clipboard writes fail.
    pub fn with_clipboard_failure(mut self) -> Self {
        self.clipboard_fails = true;
        self
    }

    /// Download persistence fails.
    pub fn with_download_failure(mut self) -> Self {
        self.downloads_fail = true;
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Bytes persisted per download filename.
    pub fn downloads(&self) -> HashMap<String, Vec<u8>> {
        self.downloads.lock().unwrap().clone()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome(&self) -> ShareOutcome {
        if self.cancel_shares {
            ShareOutcome::Cancelled
        } else {
            ShareOutcome::Delivered
        }
    }
}

#[async_trait]
impl ShareHost for MockShareHost {
    fn has_share(&self) -> bool {
        self.has_share
    }

    fn has_share_query(&self) -> bool {
        self.has_share_query
    }

    async fn can_share_file(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<bool, HostError> {
        self.record(HostCall::CanShareFile {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
        });
        if self.probe_fails {
            return Err(HostError::Unavailable("probe exploded".into()));
        }
        Ok(self.accepts_files)
    }

    async fn share_file(&self, request: &FileShareRequest<'_>) -> Result<ShareOutcome, HostError> {
        self.record(HostCall::ShareFile {
            file_name: request.file_name.to_string(),
        });
        if !self.accepts_files {
            return Err(HostError::Rejected("file payloads not accepted".into()));
        }
        Ok(self.outcome())
    }

    async fn share_text(&self, request: &TextShareRequest<'_>) -> Result<ShareOutcome, HostError> {
        self.record(HostCall::ShareText {
            title: request.title.to_string(),
        });
        if !self.has_share {
            return Err(HostError::Unavailable("no share primitive".into()));
        }
        Ok(self.outcome())
    }

    async fn copy_image(&self, _content_type: &str, bytes: &[u8]) -> Result<(), HostError> {
        self.record(HostCall::CopyImage { len: bytes.len() });
        if self.clipboard_fails {
            return Err(HostError::Rejected("image payloads rejected".into()));
        }
        Ok(())
    }

    async fn save_download(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, HostError> {
        self.record(HostCall::SaveDownload {
            file_name: file_name.to_string(),
        });
        if self.downloads_fail {
            return Err(HostError::Io("disk full".into()));
        }
        self.downloads
            .lock()
            .unwrap()
            .insert(file_name.to_string(), bytes.to_vec());
        Ok(PathBuf::from(file_name))
    }
}
