//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field carries a serde default, so an empty source set
//! still yields a usable configuration pointing at a local server.

pub mod auth;
pub mod chart;
pub mod logging;
pub mod server;
pub mod upload;

use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::chart::ChartConfig;
use self::logging::LoggingConfig;
use self::server::ServerConfig;
use self::upload::UploadConfig;

use crate::error::AppError;

/// Default location of the base configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Prefix for configuration environment variables (`FILENEST__SERVER__BASE_URL`).
pub const ENV_PREFIX: &str = "FILENEST";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Storage server location and request settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Credential attached to every request.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Upload transfer settings.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Quota chart geometry.
    #[serde(default)]
    pub chart: ChartConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the optional `config/default.toml`, the explicit file if one is
    /// given, and environment variables prefixed with `FILENEST__`. An
    /// explicit file that does not exist is an error.
    pub fn load(path: Option<&str>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some("does/not/exist/filenest.toml")).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.base_url, "http://localhost:8020");
        assert_eq!(config.server.files_path, "/api/files");
        assert!(config.auth.token.is_none());
        assert_eq!(config.chart.size, 200.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            base_url = "https://files.example.org"
            request_timeout_seconds = 5

            [auth]
            token = "abc"

            [upload]
            progress_chunk_bytes = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://files.example.org");
        assert_eq!(config.server.request_timeout_seconds, 5);
        assert_eq!(config.auth.token.as_deref(), Some("abc"));
        assert_eq!(config.upload.progress_chunk_bytes, 1024);
        assert_eq!(config.upload.max_upload_size_bytes, 1_073_741_824);
    }

    #[test]
    fn test_files_url_joins_without_double_slash() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            base_url = "http://host:9000/"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.files_url(), "http://host:9000/api/files");
    }
}
