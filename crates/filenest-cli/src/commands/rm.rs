//! File deletion CLI command.

use clap::Args;

use crate::output;
use filenest_core::config::AppConfig;
use filenest_core::error::AppError;
use filenest_core::types::FileId;

/// Arguments for the rm command
#[derive(Debug, Args)]
pub struct RmArgs {
    /// File ID
    pub id: FileId,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Execute the rm command
pub async fn execute(args: &RmArgs, config: &AppConfig) -> Result<(), AppError> {
    let client = super::connect(config)?;
    let mut view = super::open_view(&client);

    if !args.yes {
        view.refresh().await?;
        let label = view
            .find(args.id)
            .map(|r| format!("'{}' (#{})", r.name, r.id))
            .unwrap_or_else(|| format!("file #{}", args.id));

        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!("Delete {}?", label))
            .default(false)
            .interact_opt()
            .map_err(super::input_error)?;

        if confirm != Some(true) {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let outcome = view.delete(args.id).await?;
    match outcome.resync_error {
        None => output::print_success(&format!(
            "Deleted file #{}; {} file(s) remain",
            args.id,
            view.tree().file_count()
        )),
        Some(e) => {
            output::print_success(&format!("Deleted file #{}", args.id));
            super::warn_stale(&e);
        }
    }
    Ok(())
}
