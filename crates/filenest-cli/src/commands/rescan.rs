//! Storage rescan CLI command.

use crate::output;
use filenest_core::error::AppError;
use filenest_core::config::AppConfig;

/// Execute the rescan command
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let client = super::connect(config)?;
    let mut view = super::open_view(&client);

    let outcome = view.rescan().await?;
    match outcome.resync_error {
        None => output::print_success(&format!(
            "Rescan requested; {} file(s) currently listed",
            view.tree().file_count()
        )),
        Some(e) => {
            output::print_success("Rescan requested");
            super::warn_stale(&e);
        }
    }
    Ok(())
}
