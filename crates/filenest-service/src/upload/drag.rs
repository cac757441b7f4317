//! Drag-and-drop nesting tracker.
//!
//! Pointer drags over nested regions fire an enter/leave pair per region,
//! so a plain boolean flickers. The tracker counts unmatched enters instead.

/// Raw drag input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// Pointer entered a drop region.
    Enter,
    /// Pointer left a drop region.
    Leave,
    /// Pointer is moving over a drop region.
    Over,
    /// Payload was dropped.
    Drop,
}

/// Nesting counter plus a forced flag for drags whose enter was missed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragTracker {
    depth: u32,
    forced: bool,
}

impl DragTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event; returns the resulting dragging flag.
    pub fn apply(&mut self, event: DragEvent) -> bool {
        match event {
            DragEvent::Enter => self.depth += 1,
            DragEvent::Leave => {
                self.depth = self.depth.saturating_sub(1);
                if self.depth == 0 {
                    self.forced = false;
                }
            }
            DragEvent::Over => {
                if !self.is_dragging() {
                    self.forced = true;
                }
            }
            DragEvent::Drop => *self = Self::default(),
        }
        self.is_dragging()
    }

    /// Number of unmatched enter events.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether a drag is currently over the region.
    pub fn is_dragging(&self) -> bool {
        self.depth > 0 || self.forced
    }
}
