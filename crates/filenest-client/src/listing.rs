//! `GET /api/files`: the directory listing.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use filenest_core::error::AppError;
use filenest_core::result::AppResult;
use filenest_core::traits::DirectoryListing;
use filenest_core::types::{FileRecord, ListingQuery};

use crate::client::{ApiClient, check, error_detail, read_json, send};

/// The server answers an empty store (or a filter matching nothing) with a
/// 404 carrying this detail.
const NO_FILES_DETAIL: &str = "No files found";

pub(crate) fn is_empty_listing(body: &str) -> bool {
    error_detail(body).is_some_and(|detail| detail.eq_ignore_ascii_case(NO_FILES_DETAIL))
}

#[async_trait]
impl DirectoryListing for ApiClient {
    async fn list(&self, query: &ListingQuery) -> AppResult<Vec<FileRecord>> {
        let url = self.listing_url(query);
        debug!(url = %url, "Fetching directory listing");

        let response = send(self.bounded(self.http.get(&url))).await?;
        if response.status() == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            if is_empty_listing(&body) {
                return Ok(Vec::new());
            }
            return Err(AppError::http(
                404,
                error_detail(&body).unwrap_or_else(|| "404 Not Found".to_string()),
            ));
        }

        let records: Vec<FileRecord> = read_json(check(response).await?).await?;
        debug!(files = records.len(), "Directory listing received");
        Ok(records)
    }
}
