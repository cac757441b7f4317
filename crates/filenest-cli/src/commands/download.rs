//! File download CLI command.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::output;
use filenest_core::config::AppConfig;
use filenest_core::error::{AppError, ErrorKind};
use filenest_core::types::FileId;

/// Arguments for the download command
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// File ID
    pub id: FileId,

    /// Directory to save into
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,
}

/// Execute the download command
pub async fn execute(args: &DownloadArgs, config: &AppConfig) -> Result<(), AppError> {
    let client = super::connect(config)?;
    let view = super::open_view(&client);

    let file = view.download(args.id).await?;
    let target = target_path(&args.out, &file.file_name, args.id);

    tokio::fs::create_dir_all(&args.out).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Io,
            format!("Failed to create {}: {}", args.out.display(), e),
            e,
        )
    })?;
    tokio::fs::write(&target, &file.data).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Io,
            format!("Failed to write {}: {}", target.display(), e),
            e,
        )
    })?;

    output::print_success(&format!(
        "Saved {} ({})",
        target.display(),
        output::format_size(file.data.len() as u64)
    ));
    Ok(())
}

/// Where to write a download. Only the last component of the suggested
/// name is kept.
fn target_path(dir: &Path, suggested: &str, id: FileId) -> PathBuf {
    let name = Path::new(suggested)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("file-{}", id));
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_path_strips_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            target_path(dir.path(), "../../etc/passwd", FileId(1)),
            dir.path().join("passwd")
        );
        assert_eq!(
            target_path(dir.path(), "report.pdf", FileId(1)),
            dir.path().join("report.pdf")
        );
        assert_eq!(target_path(dir.path(), "..", FileId(9)), dir.path().join("file-9"));
    }
}
