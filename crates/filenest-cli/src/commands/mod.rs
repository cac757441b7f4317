//! CLI command definitions and dispatch.

pub mod config;
pub mod download;
pub mod edit;
pub mod ls;
pub mod rescan;
pub mod rm;
pub mod stats;
pub mod upload;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use filenest_client::ApiClient;
use filenest_core::config::AppConfig;
use filenest_core::error::AppError;
use filenest_service::ViewSync;

/// FileNest: browse and manage files on a FileNest storage server
#[derive(Debug, Parser)]
#[command(name = "filenest", version, about, long_about = None)]
pub struct Cli {
    /// Path to an extra configuration file (layered over config/default.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the folder tree
    Ls(ls::LsArgs),
    /// Upload a file
    Upload(upload::UploadArgs),
    /// Rename, move or comment a file
    Edit(edit::EditArgs),
    /// Delete a file
    Rm(rm::RmArgs),
    /// Download a file
    Download(download::DownloadArgs),
    /// Show storage usage charts
    Stats(stats::StatsArgs),
    /// Ask the server to rescan its storage
    Rescan,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Ls(args) => ls::execute(args, &config, self.format).await,
            Commands::Upload(args) => upload::execute(args, &config, self.format).await,
            Commands::Edit(args) => edit::execute(args, &config, self.format).await,
            Commands::Rm(args) => rm::execute(args, &config).await,
            Commands::Download(args) => download::execute(args, &config).await,
            Commands::Stats(args) => stats::execute(args, &config, self.format).await,
            Commands::Rescan => rescan::execute(&config).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
        }
    }
}

/// Helper: create the API client from config
pub fn connect(config: &AppConfig) -> Result<Arc<ApiClient>, AppError> {
    Ok(Arc::new(ApiClient::new(config)?))
}

/// Helper: a view over the server's listing
pub fn open_view(client: &Arc<ApiClient>) -> ViewSync {
    ViewSync::new(client.clone(), client.clone())
}

/// Helper: map a prompt failure
pub fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {}", e))
}

/// Helper: the server accepted the change but the listing could not be reloaded
pub fn warn_stale(e: &AppError) {
    crate::output::print_warning(&format!(
        "Change saved, but the listing could not be refreshed ({}); run `filenest ls` to retry",
        e
    ));
}
