//! Quota visualization: proportional ring segments, hover and legends.

pub mod allocator;
pub mod chart;
pub mod hover;
pub mod legend;

pub use allocator::{ArcSegment, ChartItem, allocate};
pub use chart::{ChartMode, Point, RadialChart, RingGeometry};
pub use hover::{HOVER_STROKE_GROWTH, HoverState, Tooltip};
pub use legend::{LegendRow, QuotaView, category_chart, usage_chart};
