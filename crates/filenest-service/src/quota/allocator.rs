//! Proportional arc allocation.

use serde::Serialize;

/// One labelled quantity to chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartItem {
    /// Display label.
    pub label: String,
    /// Raw quantity; negative values count as zero.
    pub value: f64,
}

impl ChartItem {
    /// Create a chart item.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A proportional slice of the ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcSegment {
    /// Position in the input sequence; hover state refers to this.
    pub index: usize,
    /// Display label.
    pub label: String,
    /// Clamped value.
    pub value: f64,
    /// Share of the circle in `[0, 1]`.
    pub fraction: f64,
    /// Arc length along the ring.
    pub length: f64,
    /// Cumulative offset from the 12 o'clock origin.
    pub offset: f64,
}

impl ArcSegment {
    /// Share of the circle as a percentage.
    pub fn percentage(&self) -> f64 {
        self.fraction * 100.0
    }

    /// Whether the segment occupies any arc at all.
    pub fn is_visible(&self) -> bool {
        self.length > 0.0
    }
}

pub(crate) fn clamp_value(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

/// Lay items out contiguously around a ring of the given circumference.
///
/// Each fraction is `value / Σ values` after clamping negatives to zero.
/// When the sum is zero every segment has zero fraction and zero length.
/// Offsets accumulate in input order.
pub fn allocate(items: &[ChartItem], circumference: f64) -> Vec<ArcSegment> {
    let total: f64 = items.iter().map(|item| clamp_value(item.value)).sum();

    let mut offset = 0.0;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let value = clamp_value(item.value);
            let fraction = if total > 0.0 { value / total } else { 0.0 };
            let length = fraction * circumference;
            let segment = ArcSegment {
                index,
                label: item.label.clone(),
                value,
                fraction,
                length,
                offset,
            };
            offset += length;
            segment
        })
        .collect()
}
