//! Ring chart geometry and display modes.

use std::f64::consts::PI;

use serde::Serialize;

use filenest_core::config::chart::ChartConfig;

use super::allocator::{ArcSegment, ChartItem, allocate};

/// Ring dimensions in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingGeometry {
    /// Outer size of the drawing (width and height).
    pub size: f64,
    /// Width of the ring stroke.
    pub stroke_width: f64,
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl RingGeometry {
    /// Create a geometry.
    pub fn new(size: f64, stroke_width: f64) -> Self {
        Self { size, stroke_width }
    }

    /// Geometry from the `[chart]` configuration section.
    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.size, config.stroke_width)
    }

    /// Coordinate of the ring's center on both axes.
    pub fn center(&self) -> f64 {
        self.size / 2.0
    }

    /// Radius of the stroke's centerline.
    pub fn radius(&self) -> f64 {
        self.size / 2.0 - self.stroke_width / 2.0
    }

    /// Length of the stroke's centerline.
    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius()
    }

    /// Point on the centerline at `degrees`, where 0° points right and
    /// angles grow clockwise in screen coordinates.
    pub fn point_at(&self, degrees: f64) -> Point {
        let radians = degrees.to_radians();
        Point {
            x: self.center() + self.radius() * radians.cos(),
            y: self.center() + self.radius() * radians.sin(),
        }
    }
}

/// A point in drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// What the chart's center shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ChartMode {
    /// The sum of all items.
    Total,
    /// What is left of `limit` after the items.
    Remaining {
        /// The capacity the items are measured against.
        limit: f64,
    },
}

/// Segments plus everything needed to render one ring.
#[derive(Debug, Clone, Serialize)]
pub struct RadialChart {
    geometry: RingGeometry,
    mode: ChartMode,
    segments: Vec<ArcSegment>,
    total: f64,
}

impl RadialChart {
    /// Allocate `items` around the ring.
    ///
    /// Segment geometry depends on the items alone. The mode only changes
    /// what the center shows.
    pub fn new(items: &[ChartItem], geometry: RingGeometry, mode: ChartMode) -> Self {
        let segments = allocate(items, geometry.circumference());
        let total: f64 = segments.iter().map(|s| s.value).sum();

        Self {
            geometry,
            mode,
            segments,
            total,
        }
    }

    /// The ring geometry.
    pub fn geometry(&self) -> RingGeometry {
        self.geometry
    }

    /// The display mode.
    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    /// All segments in input order, including zero-length ones.
    pub fn segments(&self) -> &[ArcSegment] {
        &self.segments
    }

    /// Segment by input index.
    pub fn segment(&self, index: usize) -> Option<&ArcSegment> {
        self.segments.get(index)
    }

    /// Sum of the clamped item values.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// `max(limit − total, 0)` in remaining mode.
    pub fn remaining(&self) -> Option<f64> {
        match self.mode {
            ChartMode::Total => None,
            ChartMode::Remaining { limit } => Some((limit - self.total).max(0.0)),
        }
    }

    /// The number shown in the middle of the ring.
    pub fn center_value(&self) -> f64 {
        self.remaining().unwrap_or(self.total)
    }

    /// Caption under the center value.
    pub fn center_caption(&self) -> &'static str {
        match self.mode {
            ChartMode::Total => "total",
            ChartMode::Remaining { .. } => "remaining",
        }
    }

    /// Nothing to draw but the background track.
    pub fn is_empty(&self) -> bool {
        self.total <= 0.0
    }

    /// Arc length not covered by any segment.
    pub fn uncovered_length(&self) -> f64 {
        let covered: f64 = self.segments.iter().map(|s| s.length).sum();
        (self.geometry.circumference() - covered).max(0.0)
    }

    /// Angle of a segment's midpoint in degrees, with −90° at 12 o'clock.
    pub fn midpoint_angle(&self, segment: &ArcSegment) -> f64 {
        let circumference = self.geometry.circumference();
        if circumference <= 0.0 {
            return -90.0;
        }
        (segment.offset + segment.length / 2.0) / circumference * 360.0 - 90.0
    }

    /// Tooltip anchor for a segment: its midpoint on the ring.
    pub fn anchor(&self, segment: &ArcSegment) -> Point {
        self.geometry.point_at(self.midpoint_angle(segment))
    }
}
