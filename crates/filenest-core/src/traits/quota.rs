//! Quota summary collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::QuotaSummary;

/// Source of storage quota figures.
#[async_trait]
pub trait QuotaSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the current usage summary.
    async fn summary(&self) -> AppResult<QuotaSummary>;
}
