//! File-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::{FileId, FileRecord};

/// Events related to confirmed file mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FileEvent {
    /// A file was uploaded.
    Uploaded {
        /// The record the server created.
        record: FileRecord,
    },
    /// A file's metadata was updated.
    Updated {
        /// The file ID.
        file_id: FileId,
        /// Fields that changed.
        changed_fields: Vec<String>,
    },
    /// A file was deleted.
    Deleted {
        /// The file ID.
        file_id: FileId,
    },
    /// The server rescanned its storage.
    Rescanned,
}

impl FileEvent {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uploaded { .. } => "uploaded",
            Self::Updated { .. } => "updated",
            Self::Deleted { .. } => "deleted",
            Self::Rescanned => "rescanned",
        }
    }
}
