//! Storage server connection configuration.

use serde::{Deserialize, Serialize};

/// Where the storage server lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Scheme, host and port of the server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the files API below the base URL.
    #[serde(default = "default_files_path")]
    pub files_path: String,
    /// Request timeout in seconds (applies to listing and metadata calls;
    /// uploads and downloads are only bounded by the connect timeout).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

impl ServerConfig {
    /// Absolute URL of the files API root.
    pub fn files_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.files_path.trim_start_matches('/')
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            files_path: default_files_path(),
            request_timeout_seconds: default_request_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8020".to_string()
}

fn default_files_path() -> String {
    "/api/files".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}
