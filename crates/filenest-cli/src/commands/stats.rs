//! Storage usage CLI command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use filenest_core::config::AppConfig;
use filenest_core::error::AppError;
use filenest_core::traits::QuotaSource;
use filenest_core::types::QuotaSummary;
use filenest_service::quota::{
    ChartMode, HoverState, QuotaView, RadialChart, RingGeometry, category_chart, usage_chart,
};

/// Fill characters for segments, cycled by segment index
const FILLS: [char; 5] = ['█', '▓', '▒', '░', '#'];

/// Character for arc not covered by any segment
const TRACK: char = '·';

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Show tooltip details for this category segment (by index)
    #[arg(long)]
    pub focus: Option<usize>,
}

/// Segment display row
#[derive(Debug, Tabled)]
struct SegmentRow {
    /// Fill
    #[tabled(rename = "")]
    fill: char,
    /// Label
    label: String,
    /// Megabytes
    #[tabled(rename = "MB")]
    mb: String,
    /// Share of the ring
    share: String,
    /// Arc length
    arc: String,
    /// Offset from 12 o'clock
    offset: String,
    /// Stroke width
    stroke: String,
}

#[derive(Debug, Serialize)]
struct StatsJson<'a> {
    summary: &'a QuotaSummary,
    usage: &'a QuotaView,
    categories: &'a QuotaView,
}

/// Execute the stats command
pub async fn execute(args: &StatsArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let client = super::connect(config)?;
    let summary = client.summary().await?;

    let geometry = RingGeometry::from_config(&config.chart);
    let usage = usage_chart(&summary, geometry);
    let categories = category_chart(&summary, geometry);

    let mut hover = HoverState::default();
    if let Some(index) = args.focus {
        if !hover.hover(&categories.chart, index) {
            output::print_warning(&format!("No visible category segment at index {}", index));
        }
    }

    match format {
        OutputFormat::Json => output::print_json(&StatsJson {
            summary: &summary,
            usage: &usage,
            categories: &categories,
        }),
        OutputFormat::Table => {
            print_view("Remaining space", &usage, &HoverState::default(), config.chart.strip_cells);
            println!();
            print_view("By file type", &categories, &hover, config.chart.strip_cells);

            if let Some(tooltip) = hover.tooltip(&categories.chart) {
                println!();
                println!("{}", tooltip.label);
                output::print_kv("Used", &output::format_mb(tooltip.value));
                output::print_kv("Share", &format!("{:.1}%", tooltip.percentage));
                output::print_kv(
                    "Anchor",
                    &format!("({:.1}, {:.1})", tooltip.anchor.x, tooltip.anchor.y),
                );
            }
        }
    }

    Ok(())
}

fn print_view(title: &str, view: &QuotaView, hover: &HoverState, cells: usize) {
    let chart = &view.chart;
    println!("{}", title);

    let center = match chart.mode() {
        ChartMode::Remaining { limit } => format!(
            "{} {} of {}",
            output::format_mb(chart.center_value()),
            chart.center_caption(),
            output::format_mb(limit)
        ),
        ChartMode::Total => format!(
            "{} {}",
            output::format_mb(chart.center_value()),
            chart.center_caption()
        ),
    };
    output::print_kv("Center", &center);
    println!("  [{}]", render_strip(chart, cells));

    if chart.is_empty() {
        println!("  (empty)");
    } else {
        let rows: Vec<SegmentRow> = chart
            .segments()
            .iter()
            .filter(|s| s.is_visible())
            .map(|s| SegmentRow {
                fill: fill_for(s.index),
                label: s.label.clone(),
                mb: format!("{:.1}", s.value),
                share: format!("{:.1}%", s.percentage()),
                arc: format!("{:.1}", s.length),
                offset: format!("{:.1}", s.offset),
                stroke: format!("{:.0}", hover.stroke_width_for(chart, s.index)),
            })
            .collect();
        output::print_table(&rows);
    }

    for (index, row) in view.legend.iter().enumerate() {
        let fill = chart
            .segment(index)
            .filter(|s| s.label == row.label && s.is_visible())
            .map(|s| fill_for(s.index))
            .unwrap_or(TRACK);
        println!(
            "  {} {:<12} {:>10} ({:.1}%)",
            fill,
            row.label,
            output::format_mb(row.value),
            row.percentage
        );
    }
}

fn fill_for(index: usize) -> char {
    FILLS[index % FILLS.len()]
}

/// Unroll the ring into `cells` characters, starting at 12 o'clock.
fn render_strip(chart: &RadialChart, cells: usize) -> String {
    let circumference = chart.geometry().circumference();
    if cells == 0 || circumference <= 0.0 {
        return String::new();
    }

    (0..cells)
        .map(|cell| {
            let position = (cell as f64 + 0.5) / cells as f64 * circumference;
            chart
                .segments()
                .iter()
                .filter(|s| s.is_visible())
                .find(|s| position >= s.offset && position < s.offset + s.length)
                .map(|s| fill_for(s.index))
                .unwrap_or(TRACK)
        })
        .collect()
}
