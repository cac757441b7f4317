//! Quota chart geometry configuration.

use serde::{Deserialize, Serialize};

/// Ring chart dimensions, in the renderer's drawing units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Outer diameter of the ring.
    #[serde(default = "default_size")]
    pub size: f64,
    /// Width of the ring stroke.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Number of cells used when the ring is drawn as a text strip.
    #[serde(default = "default_strip_cells")]
    pub strip_cells: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            stroke_width: default_stroke_width(),
            strip_cells: default_strip_cells(),
        }
    }
}

fn default_size() -> f64 {
    200.0
}

fn default_stroke_width() -> f64 {
    32.0
}

fn default_strip_cells() -> usize {
    40
}
