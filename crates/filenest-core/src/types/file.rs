//! File records as served by the directory listing, and the partial patch
//! used to update them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::FileId;
use super::timestamp;

/// One stored file, as reported by the server.
///
/// The client never mutates a record; every change goes through the
/// server and comes back in the next listing snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Server-assigned identifier.
    pub id: FileId,
    /// Display name, including the extension.
    pub name: String,
    /// Extension without the leading dot (may be empty).
    #[serde(default)]
    pub extension: String,
    /// Size in bytes.
    pub size: u64,
    /// Slash-delimited folder path, excluding the file's own name.
    #[serde(default)]
    pub path: String,
    /// Free-text annotation.
    #[serde(default)]
    pub comment: Option<String>,
    /// When the file was first stored.
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub creation_date: DateTime<Utc>,
    /// When the file was last modified, if ever.
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub update_date: Option<DateTime<Utc>>,
}

impl FileRecord {
    /// Folder path segments, with empty segments discarded.
    ///
    /// Leading, trailing and repeated slashes therefore never produce
    /// empty-named folders.
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        split_path(&self.path)
    }

    /// The path normalized to `a/b/c` form (empty for the root).
    pub fn normalized_path(&self) -> String {
        normalize_path(&self.path)
    }
}

/// Split a relative path on `/`, discarding empty segments.
pub fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Normalize a relative path to `a/b/c` form.
pub fn normalize_path(path: &str) -> String {
    split_path(path).collect::<Vec<_>>().join("/")
}

/// Partial field patch for a stored file.
///
/// Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New folder path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// New comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FileUpdate {
    /// Whether the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.path.is_none() && self.comment.is_none()
    }

    /// Names of the fields this patch sets.
    pub fn changed_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name".to_string());
        }
        if self.path.is_some() {
            fields.push("path".to_string());
        }
        if self.comment.is_some() {
            fields.push("comment".to_string());
        }
        fields
    }
}
