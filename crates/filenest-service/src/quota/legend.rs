//! Quota views: a chart plus its legend, built from a [`QuotaSummary`].

use serde::Serialize;

use filenest_core::types::QuotaSummary;

use super::allocator::{ChartItem, clamp_value};
use super::chart::{ChartMode, RadialChart, RingGeometry};

/// One legend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendRow {
    pub label: String,
    /// Megabytes.
    pub value: f64,
    pub percentage: f64,
}

/// A chart and the legend rendered beside it.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaView {
    pub chart: RadialChart,
    pub legend: Vec<LegendRow>,
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

/// Used space against the limit, with the remaining space in the center.
pub fn usage_chart(summary: &QuotaSummary, geometry: RingGeometry) -> QuotaView {
    let used = clamp_value(summary.total_used_mb);
    let free = summary.free();
    let limit = clamp_value(summary.limit_mb);

    let items: Vec<ChartItem> = [ChartItem::new("Used", used)]
        .into_iter()
        .filter(|item| item.value > 0.0)
        .collect();

    QuotaView {
        chart: RadialChart::new(&items, geometry, ChartMode::Remaining { limit }),
        legend: vec![
            LegendRow {
                label: "Used".to_string(),
                value: used,
                percentage: percent_of(used, limit),
            },
            LegendRow {
                label: "Free".to_string(),
                value: free,
                percentage: percent_of(free, limit),
            },
        ],
    }
}

/// Usage split by file category. Empty categories are left out.
pub fn category_chart(summary: &QuotaSummary, geometry: RingGeometry) -> QuotaView {
    let entries: Vec<(&'static str, f64)> = summary
        .by_category_mb
        .entries()
        .into_iter()
        .map(|(category, mb)| (category.label(), clamp_value(mb)))
        .collect();
    let sum: f64 = entries.iter().map(|(_, mb)| mb).sum();

    let items: Vec<ChartItem> = entries
        .iter()
        .filter(|(_, mb)| *mb > 0.0)
        .map(|(label, mb)| ChartItem::new(*label, *mb))
        .collect();

    let legend = items
        .iter()
        .map(|item| LegendRow {
            label: item.label.clone(),
            value: item.value,
            percentage: percent_of(item.value, sum),
        })
        .collect();

    QuotaView {
        chart: RadialChart::new(&items, geometry, ChartMode::Total),
        legend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filenest_core::types::CategoryUsage;

    fn summary() -> QuotaSummary {
        QuotaSummary {
            total_used_mb: 60.0,
            limit_mb: 100.0,
            free_mb: Some(40.0),
            by_category_mb: CategoryUsage {
                audio: 30.0,
                video: 0.0,
                images: 20.0,
                documents: 10.0,
                other: 0.0,
            },
        }
    }

    #[test]
    fn test_usage_chart() {
        let view = usage_chart(&summary(), RingGeometry::default());
        assert_eq!(view.chart.center_value(), 40.0);
        assert_eq!(view.chart.segments().len(), 1);
        assert_eq!(view.legend[0].percentage, 60.0);
        assert_eq!(view.legend[1].percentage, 40.0);
    }

    #[test]
    fn test_usage_chart_with_nothing_used() {
        let mut summary = summary();
        summary.total_used_mb = 0.0;
        summary.free_mb = None;
        let view = usage_chart(&summary, RingGeometry::default());
        assert!(view.chart.segments().is_empty());
        assert_eq!(view.chart.center_value(), 100.0);
        assert_eq!(view.legend[1].value, 100.0);
    }

    #[test]
    fn test_category_chart_skips_empty_categories() {
        let view = category_chart(&summary(), RingGeometry::default());
        let labels: Vec<&str> = view.chart.segments().iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Audio", "Images", "Documents"]);
        assert_eq!(view.legend[0].percentage, 50.0);
        assert_eq!(view.chart.center_value(), 60.0);
    }

    #[test]
    fn test_zero_limit_has_zero_percentages() {
        let summary = QuotaSummary::default();
        let view = usage_chart(&summary, RingGeometry::default());
        assert!(view.legend.iter().all(|row| row.percentage == 0.0));
    }
}
