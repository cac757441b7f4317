//! Directory listing collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::{FileRecord, ListingQuery};

/// Source of directory listing snapshots.
#[async_trait]
pub trait DirectoryListing: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the full flat list of file records, optionally filtered
    /// server-side.
    async fn list(&self, query: &ListingQuery) -> AppResult<Vec<FileRecord>>;
}
