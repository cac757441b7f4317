//! Shared HTTP plumbing: client construction, URLs and response checks.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use filenest_core::config::AppConfig;
use filenest_core::error::{AppError, ErrorKind};
use filenest_core::result::AppResult;
use filenest_core::types::{FileId, ListingQuery};

/// Client for the storage server's files API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    files_url: String,
    request_timeout: Duration,
    pub(crate) progress_chunk_bytes: usize,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// The bearer token, when configured, is attached to every request.
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = config.auth.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                AppError::configuration("Auth token contains characters not allowed in a header")
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.server.connect_timeout_seconds))
            .user_agent(concat!("filenest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            http,
            files_url: config.server.files_url(),
            request_timeout: Duration::from_secs(config.server.request_timeout_seconds),
            progress_chunk_bytes: config.upload.progress_chunk_bytes.max(1),
        })
    }

    /// Absolute URL of the files API root.
    pub fn files_url(&self) -> &str {
        &self.files_url
    }

    /// `GET` URL for a listing, with the filter as the `path` parameter.
    pub fn listing_url(&self, query: &ListingQuery) -> String {
        match &query.path {
            Some(path) => format!("{}?path={}", self.files_url, urlencoding::encode(path)),
            None => self.files_url.clone(),
        }
    }

    /// URL of one file.
    pub fn file_url(&self, id: FileId) -> String {
        format!("{}/{id}", self.files_url)
    }

    /// URL below the files API root, e.g. `stats`.
    pub fn endpoint(&self, suffix: &str) -> String {
        format!("{}/{}", self.files_url, suffix.trim_start_matches('/'))
    }

    /// Apply the request timeout used for listing and metadata calls.
    pub(crate) fn bounded(&self, request: RequestBuilder) -> RequestBuilder {
        request.timeout(self.request_timeout)
    }
}

/// Map a transport-level reqwest failure.
pub(crate) fn map_reqwest(err: reqwest::Error) -> AppError {
    if err.is_decode() {
        return AppError::with_source(
            ErrorKind::Parse,
            format!("Malformed response body: {err}"),
            err,
        );
    }
    let message = if err.is_timeout() {
        format!("Request timed out: {err}")
    } else if err.is_connect() {
        format!("Could not connect to server: {err}")
    } else {
        format!("Request failed: {err}")
    };
    AppError::with_source(ErrorKind::Network, message, err)
}

/// Send a request, mapping transport failures.
pub(crate) async fn send(request: RequestBuilder) -> AppResult<Response> {
    request.send().await.map_err(map_reqwest)
}

/// Pass 2xx responses through; turn anything else into an HTTP error.
pub(crate) async fn check(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let reason = status.canonical_reason().unwrap_or("error");
    Err(AppError::http(
        status.as_u16(),
        error_detail(&body).unwrap_or_else(|| format!("{} {reason}", status.as_u16())),
    ))
}

/// Decode a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let bytes = response.bytes().await.map_err(map_reqwest)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::with_source(ErrorKind::Parse, format!("Unexpected response body: {e}"), e)
    })
}

/// The `detail` message of a server error body, if it has one.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        let mut config = AppConfig::default();
        config.server.base_url = base_url.to_string();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_urls() {
        let client = client("http://localhost:8020/");
        assert_eq!(client.files_url(), "http://localhost:8020/api/files");
        assert_eq!(client.file_url(FileId(7)), "http://localhost:8020/api/files/7");
        assert_eq!(client.endpoint("/stats"), "http://localhost:8020/api/files/stats");
    }

    #[test]
    fn test_listing_url_encodes_filter() {
        let client = client("http://localhost:8020");
        assert_eq!(
            client.listing_url(&ListingQuery::all()),
            "http://localhost:8020/api/files"
        );
        assert_eq!(
            client.listing_url(&ListingQuery::from_filter("docs/2024 q&a")),
            "http://localhost:8020/api/files?path=docs%2F2024%20q%26a"
        );
    }

    #[test]
    fn test_invalid_token_is_configuration_error() {
        let mut config = AppConfig::default();
        config.auth.token = Some("bad\ntoken".to_string());
        let err = ApiClient::new(&config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_error_detail() {
        assert_eq!(
            error_detail(r#"{"detail": "No files found"}"#).as_deref(),
            Some("No files found")
        );
        assert_eq!(error_detail("<html>"), None);
    }
}
