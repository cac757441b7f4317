//! Folder tree listing CLI command.

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use filenest_core::config::AppConfig;
use filenest_core::error::AppError;
use filenest_core::types::FileRecord;
use filenest_service::{ExpansionState, TreeRow, visible_rows};

/// Arguments for the ls command
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Server-side path filter
    #[arg(short, long)]
    pub search: Option<String>,

    /// Expand folders down to this depth (default: top level only)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Expand every folder
    #[arg(short, long, conflicts_with = "depth")]
    pub all: bool,
}

/// JSON shape of one visible row
#[derive(Debug, Serialize)]
struct RowJson<'a> {
    depth: usize,
    kind: &'static str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a FileRecord>,
}

/// Execute the ls command
pub async fn execute(args: &LsArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let client = super::connect(config)?;
    let mut view = super::open_view(&client);

    match &args.search {
        Some(text) => view.set_filter(text).await?,
        None => view.refresh().await?,
    }

    let mut expansion = ExpansionState::default();
    if args.all {
        expansion.expand_all_to(usize::MAX);
    } else if let Some(depth) = args.depth {
        expansion.expand_all_to(depth);
    }

    let rows = visible_rows(view.tree(), &expansion);

    match format {
        OutputFormat::Json => {
            let json: Vec<RowJson<'_>> = rows.iter().map(row_json).collect();
            output::print_json(&json);
        }
        OutputFormat::Table => {
            if view.tree().is_empty() {
                match view.filter() {
                    Some(filter) => println!("No files match '{}'.", filter),
                    None => println!("No files yet."),
                }
                return Ok(());
            }
            for row in &rows {
                println!("{}", render_row(row));
            }
            println!();
            println!("{} file(s)", view.tree().file_count());
        }
    }

    Ok(())
}

fn row_json<'a>(row: &'a TreeRow<'a>) -> RowJson<'a> {
    RowJson {
        depth: row.depth,
        kind: if row.is_folder() { "folder" } else { "file" },
        name: row.entry.name(),
        path: row.folder_path.as_deref(),
        children: row.is_folder().then_some(row.child_count),
        file: row.entry.record(),
    }
}

/// One indented line of the tree view
fn render_row(row: &TreeRow<'_>) -> String {
    let indent = "  ".repeat(row.depth);
    match row.entry.record() {
        None => {
            let marker = if row.expanded { "▾" } else { "▸" };
            format!("{indent}{marker} {}/ ({})", row.entry.name(), row.child_count)
        }
        Some(record) => {
            let comment = record
                .comment
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| format!("  ({c})"))
                .unwrap_or_default();
            format!(
                "{indent}  {}  [{}]  #{}{}",
                record.name,
                output::format_size(record.size),
                record.id,
                comment
            )
        }
    }
}
