//! File transport collaborator: upload, delete, update, download.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::{FileId, FileRecord, FileUpdate};

/// Progress callback, invoked with a fraction in `[0, 1]`.
pub type ProgressFn = Arc<dyn Fn(f64) + Send + Sync>;

/// Everything needed to upload one file.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File name sent with the payload.
    pub file_name: String,
    /// The file contents.
    pub data: Bytes,
    /// Destination folder path (empty for the root).
    pub path: String,
    /// Optional comment.
    pub comment: String,
}

/// A downloaded payload plus the name the server suggested for it.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// Suggested file name.
    pub file_name: String,
    /// The file contents.
    pub data: Bytes,
}

/// Trait for the remote file transport.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug + 'static {
    /// Upload a file. `on_progress` is called zero or more times with a
    /// non-decreasing fraction while the body is being sent.
    async fn upload(&self, request: UploadRequest, on_progress: ProgressFn)
    -> AppResult<FileRecord>;

    /// Delete a file by id.
    async fn delete(&self, id: FileId) -> AppResult<()>;

    /// Apply a partial metadata patch.
    async fn update(&self, id: FileId, patch: &FileUpdate) -> AppResult<FileRecord>;

    /// Download a file's contents.
    async fn download(&self, id: FileId) -> AppResult<DownloadedFile>;

    /// Ask the server to rescan its backing storage.
    async fn rescan(&self) -> AppResult<()>;
}
