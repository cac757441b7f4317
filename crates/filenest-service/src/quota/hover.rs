//! Hover highlighting and tooltips for ring segments.

use serde::Serialize;

use super::chart::{Point, RadialChart};

/// Extra stroke width given to the hovered segment.
pub const HOVER_STROKE_GROWTH: f64 = 6.0;

/// Which segment, if any, is under the pointer.
///
/// Keyed by segment index, so charts with repeated labels still highlight
/// a single segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    index: Option<usize>,
}

/// Tooltip contents for the hovered segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    pub anchor: Point,
}

impl HoverState {
    /// Hover a segment. Zero-length segments are not drawn and cannot be
    /// hovered; returns whether the hover took effect.
    pub fn hover(&mut self, chart: &RadialChart, index: usize) -> bool {
        let visible = chart.segment(index).is_some_and(|s| s.is_visible());
        self.index = visible.then_some(index);
        visible
    }

    /// Pointer left the chart.
    pub fn clear(&mut self) {
        self.index = None;
    }

    /// Index of the hovered segment.
    pub fn hovered(&self) -> Option<usize> {
        self.index
    }

    /// Tooltip for the hovered segment.
    pub fn tooltip(&self, chart: &RadialChart) -> Option<Tooltip> {
        let segment = chart.segment(self.index?)?;
        Some(Tooltip {
            label: segment.label.clone(),
            value: segment.value,
            percentage: segment.percentage(),
            anchor: chart.anchor(segment),
        })
    }

    /// Stroke width to draw segment `index` with.
    pub fn stroke_width_for(&self, chart: &RadialChart, index: usize) -> f64 {
        let base = chart.geometry().stroke_width;
        if self.index == Some(index) {
            base + HOVER_STROKE_GROWTH
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quota::allocator::ChartItem;
    use crate::quota::chart::{ChartMode, RingGeometry};

    fn chart() -> RadialChart {
        RadialChart::new(
            &[
                ChartItem::new("Other", 2.0),
                ChartItem::new("Other", 2.0),
                ChartItem::new("Empty", 0.0),
            ],
            RingGeometry::default(),
            ChartMode::Total,
        )
    }

    #[test]
    fn test_duplicate_labels_highlight_one_segment() {
        let chart = chart();
        let mut hover = HoverState::default();
        assert!(hover.hover(&chart, 1));

        assert_eq!(hover.stroke_width_for(&chart, 0), 32.0);
        assert_eq!(hover.stroke_width_for(&chart, 1), 38.0);
    }

    #[test]
    fn test_tooltip() {
        let chart = chart();
        let mut hover = HoverState::default();
        assert!(hover.tooltip(&chart).is_none());

        hover.hover(&chart, 0);
        let tooltip = hover.tooltip(&chart).unwrap();
        assert_eq!(tooltip.label, "Other");
        assert_eq!(tooltip.percentage, 50.0);

        hover.clear();
        assert_eq!(hover.hovered(), None);
    }

    #[test]
    fn test_cannot_hover_invisible_segment() {
        let chart = chart();
        let mut hover = HoverState::default();
        assert!(!hover.hover(&chart, 2));
        assert!(!hover.hover(&chart, 9));
        assert_eq!(hover.hovered(), None);
    }
}
