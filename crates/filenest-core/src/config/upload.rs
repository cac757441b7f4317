//! Upload transfer configuration.

use serde::{Deserialize, Serialize};

/// Upload transfer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Body chunk size; one progress report is emitted per chunk sent.
    #[serde(default = "default_progress_chunk")]
    pub progress_chunk_bytes: usize,
    /// Largest file the client will stage (default 1 GB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            progress_chunk_bytes: default_progress_chunk(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_progress_chunk() -> usize {
    65_536 // 64 KB
}

fn default_max_upload() -> u64 {
    1_073_741_824 // 1 GB
}
