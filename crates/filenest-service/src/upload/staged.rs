//! A local file held in memory while awaiting upload.

use std::path::Path;

use bytes::Bytes;

use filenest_core::error::AppError;
use filenest_core::result::AppResult;

/// File contents staged for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedFile {
    /// File name sent to the server.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Contents.
    pub data: Bytes,
}

impl StagedFile {
    /// Wrap in-memory contents.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            name: name.into(),
            size: data.len() as u64,
            data,
        }
    }

    /// Read a local file.
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::validation(format!("Not a file path: {}", path.display()))
            })?
            .to_string();

        let data = tokio::fs::read(path).await.map_err(|e| {
            AppError::with_source(
                filenest_core::error::ErrorKind::Io,
                format!("Failed to read {}: {e}", path.display()),
                e,
            )
        })?;

        Ok(Self::from_bytes(name, data))
    }
}
