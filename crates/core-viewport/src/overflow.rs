//! Hidden-item accounting derived from a viewport snapshot.

use crate::engine::ViewportState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverflowCounts {
    /// Items hidden above the viewport (equals the offset).
    pub above: usize,
    /// Items hidden below the viewport.
    pub below: usize,
}

impl OverflowCounts {
    pub fn from_viewport(viewport: &ViewportState) -> Self {
        Self {
            above: viewport.offset,
            below: viewport
                .total_count
                .saturating_sub(viewport.offset.saturating_add(viewport.visible_count)),
        }
    }

    pub fn has_above(&self) -> bool {
        self.above > 0
    }

    pub fn has_below(&self) -> bool {
        self.below > 0
    }
}

impl From<ViewportState> for OverflowCounts {
    fn from(viewport: ViewportState) -> Self {
        Self::from_viewport(&viewport)
    }
}
