//! `GET /api/files/stats`: the quota summary.

use async_trait::async_trait;

use filenest_core::result::AppResult;
use filenest_core::traits::QuotaSource;
use filenest_core::types::QuotaSummary;

use crate::client::{ApiClient, check, read_json, send};

#[async_trait]
impl QuotaSource for ApiClient {
    async fn summary(&self) -> AppResult<QuotaSummary> {
        let response = send(self.bounded(self.http.get(self.endpoint("stats")))).await?;
        read_json(check(response).await?).await
    }
}
