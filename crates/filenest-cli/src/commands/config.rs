//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use filenest_core::config::AppConfig;
use filenest_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let shown = redacted(config);
            match format {
                OutputFormat::Json => output::print_json(&shown),
                OutputFormat::Table => {
                    println!("Server");
                    output::print_kv("Files API", &shown.server.files_url());
                    output::print_kv(
                        "Request timeout",
                        &format!("{}s", shown.server.request_timeout_seconds),
                    );
                    output::print_kv(
                        "Connect timeout",
                        &format!("{}s", shown.server.connect_timeout_seconds),
                    );
                    output::print_kv(
                        "Token",
                        shown.auth.token.as_deref().unwrap_or("(none)"),
                    );
                    println!("Upload");
                    output::print_kv(
                        "Progress chunk",
                        &output::format_size(shown.upload.progress_chunk_bytes as u64),
                    );
                    output::print_kv(
                        "Max size",
                        &output::format_size(shown.upload.max_upload_size_bytes),
                    );
                    println!("Chart");
                    output::print_kv("Size", &shown.chart.size.to_string());
                    output::print_kv("Stroke width", &shown.chart.stroke_width.to_string());
                    println!("Logging");
                    output::print_kv("Level", &shown.logging.level);
                    output::print_kv("Format", &shown.logging.format);
                }
            }
        }
    }

    Ok(())
}

/// Copy of the config with the token masked
fn redacted(config: &AppConfig) -> AppConfig {
    let mut shown = config.clone();
    if shown.auth.token.is_some() {
        shown.auth.token = Some("********".to_string());
    }
    shown
}
