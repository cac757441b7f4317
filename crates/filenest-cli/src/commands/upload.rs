//! File upload CLI command.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::output::{self, OutputFormat};
use filenest_core::config::AppConfig;
use filenest_core::error::AppError;
use filenest_core::types::FileRecord;
use filenest_service::{StageOutcome, StagedFile, UploadCoordinator, UploadMetadata};

/// Arguments for the upload command
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Path to the file to upload
    pub file: PathBuf,

    /// Destination folder path
    #[arg(short, long)]
    pub path: Option<String>,

    /// Comment to attach
    #[arg(short, long)]
    pub comment: Option<String>,

    /// Do not prompt; missing metadata is left empty
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the upload command
pub async fn execute(args: &UploadArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let client = super::connect(config)?;
    let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel();
    let coordinator = UploadCoordinator::new(client.clone())
        .with_events(events_tx)
        .with_max_upload_size(config.upload.max_upload_size_bytes);

    let staged = StagedFile::from_path(&args.file).await?;
    let size = staged.size;
    match coordinator.stage([staged]) {
        StageOutcome::Staged { name } => {
            tracing::debug!(file = %name, size, "File staged");
        }
        StageOutcome::TooLarge { size, limit } => {
            return Err(AppError::validation(format!(
                "File is {} but the upload limit is {}",
                output::format_size(size),
                output::format_size(limit)
            )));
        }
        StageOutcome::Busy => return Err(AppError::busy("An upload is already in progress")),
        StageOutcome::NothingOffered => return Err(AppError::validation("No file to upload")),
    }

    let Some(metadata) = ask_metadata(args, size)? else {
        coordinator.cancel();
        println!("Cancelled.");
        return Ok(());
    };

    let record = loop {
        match run_with_progress(&coordinator, metadata.clone(), format.is_human()).await {
            Ok(Some(record)) => break record,
            Ok(None) => return Err(AppError::validation("No file is staged for upload")),
            Err(e) => {
                output::print_error(&format!("Upload failed: {}", e));
                if args.yes || !e.is_retryable() || !ask_retry()? {
                    coordinator.dismiss();
                    return Err(e);
                }
                coordinator.retry()?;
            }
        }
    };

    let mut view = super::open_view(&client);
    let in_tree = match view.drain(&mut events_rx).await {
        Ok(_) => view.find(record.id).is_some(),
        Err(e) => {
            super::warn_stale(&e);
            false
        }
    };
    report(&record, in_tree, format);
    Ok(())
}

/// Collect the destination and comment, prompting for what was not given.
/// `None` means the user backed out.
fn ask_metadata(args: &UploadArgs, size: u64) -> Result<Option<UploadMetadata>, AppError> {
    if args.yes {
        return Ok(Some(UploadMetadata::new(
            args.path.as_deref().unwrap_or(""),
            args.comment.as_deref().unwrap_or(""),
        )));
    }

    let path = match &args.path {
        Some(p) => p.clone(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Destination folder (empty for root)")
            .allow_empty(true)
            .interact_text()
            .map_err(super::input_error)?,
    };
    let comment = match &args.comment {
        Some(c) => c.clone(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Comment (optional)")
            .allow_empty(true)
            .interact_text()
            .map_err(super::input_error)?,
    };

    let metadata = UploadMetadata::new(path, comment);
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let confirm = dialoguer::Confirm::new()
        .with_prompt(format!(
            "Upload '{}' ({}) to /{}?",
            name,
            output::format_size(size),
            metadata.path
        ))
        .default(true)
        .interact_opt()
        .map_err(super::input_error)?;

    Ok((confirm == Some(true)).then_some(metadata))
}

fn ask_retry() -> Result<bool, AppError> {
    let retry = dialoguer::Confirm::new()
        .with_prompt("Retry?")
        .default(true)
        .interact_opt()
        .map_err(super::input_error)?;
    Ok(retry == Some(true))
}

/// Run the upload, redrawing a progress line while it is in flight.
async fn run_with_progress(
    coordinator: &UploadCoordinator,
    metadata: UploadMetadata,
    show_progress: bool,
) -> Result<Option<FileRecord>, AppError> {
    let upload = coordinator.confirm(metadata);
    tokio::pin!(upload);

    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    let result = loop {
        tokio::select! {
            result = &mut upload => break result,
            _ = ticker.tick() => {
                if show_progress {
                    if let Some(progress) = coordinator.progress() {
                        draw_progress(progress);
                    }
                }
            }
        }
    };

    if show_progress {
        if result.is_ok() {
            draw_progress(1.0);
        }
        eprintln!();
    }
    result
}

fn draw_progress(fraction: f64) {
    const WIDTH: usize = 30;
    let filled = ((fraction * WIDTH as f64).round() as usize).min(WIDTH);
    eprint!(
        "\r  [{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        fraction * 100.0
    );
    let _ = std::io::stderr().flush();
}

fn report(record: &FileRecord, in_tree: bool, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(record),
        OutputFormat::Table => {
            output::print_success(&format!("Uploaded '{}' (#{})", record.name, record.id));
            output::print_kv("Location", &format!("/{}", record.normalized_path()));
            output::print_kv("Size", &output::format_size(record.size));
            if let Some(comment) = record.comment.as_deref().filter(|c| !c.is_empty()) {
                output::print_kv("Comment", comment);
            }
            if !in_tree {
                output::print_warning("The file is not in the listing yet; try `filenest ls` again shortly");
            }
        }
    }
}
