//! File metadata editing CLI command.

use clap::Args;

use crate::output::{self, OutputFormat};
use filenest_core::config::AppConfig;
use filenest_core::error::AppError;
use filenest_core::types::{FileId, FileUpdate};

/// Arguments for the edit command
#[derive(Debug, Args)]
pub struct EditArgs {
    /// File ID
    pub id: FileId,

    /// New file name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New folder path (empty string moves the file to the root)
    #[arg(short, long)]
    pub path: Option<String>,

    /// New comment
    #[arg(short, long)]
    pub comment: Option<String>,
}

impl EditArgs {
    /// The patch described by the flags
    fn patch(&self) -> FileUpdate {
        FileUpdate {
            name: self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            path: self.path.as_deref().map(|p| p.trim().to_string()),
            comment: self.comment.clone(),
        }
    }
}

/// Execute the edit command
pub async fn execute(args: &EditArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let patch = args.patch();
    if patch.is_empty() {
        return Err(AppError::validation(
            "Nothing to change; pass --name, --path or --comment",
        ));
    }

    let client = super::connect(config)?;
    let mut view = super::open_view(&client);
    let outcome = view.update(args.id, &patch).await?;
    let record = outcome.value;

    match format {
        OutputFormat::Json => output::print_json(&record),
        OutputFormat::Table => {
            output::print_success(&format!("Updated file #{}", record.id));
            output::print_kv("Name", &record.name);
            output::print_kv("Path", &format!("/{}", record.normalized_path()));
            output::print_kv("Comment", record.comment.as_deref().unwrap_or(""));
        }
    }
    if let Some(e) = &outcome.resync_error {
        super::warn_stale(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_ignored() {
        let args = EditArgs {
            id: FileId(1),
            name: Some("  ".to_string()),
            path: Some(" docs/2024 ".to_string()),
            comment: None,
        };
        let patch = args.patch();
        assert_eq!(patch.name, None);
        assert_eq!(patch.path.as_deref(), Some("docs/2024"));
    }
}
