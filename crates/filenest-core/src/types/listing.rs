//! Directory listing query parameters.

use serde::{Deserialize, Serialize};

/// Parameters for a directory listing fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Server-side filter on the relative path. `None` lists everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ListingQuery {
    /// Query that lists every file.
    pub fn all() -> Self {
        Self::default()
    }

    /// Query built from free text typed by the user.
    ///
    /// Whitespace-only input is treated as no filter at all.
    pub fn from_filter(text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            path: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        }
    }
}
