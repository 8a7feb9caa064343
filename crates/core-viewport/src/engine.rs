//! Viewport engine: the offset state machine.
//!
//! The only state is `offset` (first visible index) plus the inputs it was last
//! computed against. Every public mutator is one transition and re-clamps the
//! offset into `[0, max_offset]` before returning, so the invariant
//! `0 <= offset <= max(0, total_count - visible_count)` holds between calls.
//!
//! Transitions:
//! * `update`: new caller inputs. Counts changed -> remeasure first, then
//!   selection sync. Unchanged inputs leave the offset alone.
//! * `sync_selection`: minimal scroll that brings the selection into view.
//! * `scroll_to_index`: imperative jump with an alignment policy.
//! * `remeasure`: clamp after the counts shrank.
//!
//! Every transition ends with a selection sync, so whenever anything is
//! visible the clamped selection lies inside `visible_range()`. An imperative
//! scroll that would push the selection off screen is pulled back just far
//! enough to keep it on the first or last visible row.

use std::ops::Range;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::overflow::OverflowCounts;

/// Where `scroll_to_index` places the target row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Minimal scroll, same policy as selection sync.
    #[default]
    Auto,
    Top,
    Center,
    Bottom,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Auto => "auto",
            Alignment::Top => "top",
            Alignment::Center => "center",
            Alignment::Bottom => "bottom",
        }
    }
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Alignment::Auto),
            "top" => Ok(Alignment::Top),
            "center" => Ok(Alignment::Center),
            "bottom" => Ok(Alignment::Bottom),
            other => Err(format!("unknown alignment: {other}")),
        }
    }
}

/// Snapshot handed to renderers and change observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ViewportState {
    /// Items hidden above the viewport.
    pub offset: usize,
    pub visible_count: usize,
    pub total_count: usize,
}

impl ViewportState {
    pub fn max_offset(&self) -> usize {
        max_offset(self.total_count, self.visible_count)
    }

    /// Absolute indices of the visible slice, always within `0..total_count`.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_count);
        let end = self
            .offset
            .saturating_add(self.visible_count)
            .min(self.total_count);
        start..end
    }

    pub fn overflow(&self) -> OverflowCounts {
        OverflowCounts::from_viewport(self)
    }
}

/// Inputs supplied by the caller on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportInputs {
    pub total_count: usize,
    pub visible_count: usize,
    /// Raw selection; clamped by the engine.
    pub selected_index: usize,
}

impl ViewportInputs {
    pub fn new(total_count: usize, visible_count: usize, selected_index: usize) -> Self {
        Self {
            total_count,
            visible_count,
            selected_index,
        }
    }
}

/// Before/after pair produced by every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub before: ViewportState,
    pub after: ViewportState,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

#[inline]
pub fn max_offset(total_count: usize, visible_count: usize) -> usize {
    total_count.saturating_sub(visible_count)
}

/// Clamp a raw selection into `[0, total_count - 1]`; 0 for an empty list.
#[inline]
pub fn clamp_selection(selected_index: usize, total_count: usize) -> usize {
    selected_index.min(total_count.saturating_sub(1))
}

/// Minimal-scroll offset that keeps `selected` within the window starting at
/// `offset`. Returns `offset` unchanged when the selection is already visible
/// or when there is no room to show anything. Result is not range clamped.
pub fn compute_sync_offset(selected: usize, offset: usize, visible_count: usize) -> usize {
    if visible_count == 0 {
        return offset;
    }
    if selected < offset {
        selected
    } else if selected >= offset + visible_count {
        selected + 1 - visible_count
    } else {
        offset
    }
}

#[derive(Debug, Clone)]
pub struct ViewportEngine {
    offset: usize,
    visible_count: usize,
    total_count: usize,
    selected_index: usize,
}

impl ViewportEngine {
    /// Initial offset comes from one selection sync against offset 0.
    pub fn new(inputs: ViewportInputs) -> Self {
        let mut engine = Self {
            offset: 0,
            visible_count: inputs.visible_count,
            total_count: inputs.total_count,
            selected_index: inputs.selected_index,
        };
        let selected = engine.selected_index();
        engine.offset = engine.clamp(compute_sync_offset(selected, 0, engine.visible_count));
        trace!(
            target: "viewport",
            offset = engine.offset,
            visible = engine.visible_count,
            total = engine.total_count,
            "engine_init"
        );
        engine
    }

    /// Pure read of the current state.
    pub fn viewport(&self) -> ViewportState {
        ViewportState {
            offset: self.offset,
            visible_count: self.visible_count,
            total_count: self.total_count,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Selection after clamping into the list bounds.
    pub fn selected_index(&self) -> usize {
        clamp_selection(self.selected_index, self.total_count)
    }

    pub fn inputs(&self) -> ViewportInputs {
        ViewportInputs::new(self.total_count, self.visible_count, self.selected_index)
    }

    /// Apply new caller inputs.
    pub fn update(&mut self, inputs: ViewportInputs) -> Transition {
        let before = self.viewport();
        if inputs == self.inputs() {
            return Transition {
                before,
                after: before,
            };
        }
        let counts_changed =
            inputs.total_count != self.total_count || inputs.visible_count != self.visible_count;
        self.total_count = inputs.total_count;
        self.visible_count = inputs.visible_count;
        self.selected_index = inputs.selected_index;
        if counts_changed {
            self.clamp_to_max();
        }
        self.resync();
        Transition {
            before,
            after: self.viewport(),
        }
    }

    /// Record a new selection and scroll minimally to reveal it.
    pub fn sync_selection(&mut self, selected_index: usize) -> Transition {
        let before = self.viewport();
        self.selected_index = selected_index;
        self.resync();
        Transition {
            before,
            after: self.viewport(),
        }
    }

    /// Imperative scroll. Does not change the recorded selection; the
    /// trailing sync keeps that selection on screen.
    pub fn scroll_to_index(&mut self, index: usize, alignment: Alignment) -> Transition {
        let before = self.viewport();
        let target = clamp_selection(index, self.total_count);
        let raw = match alignment {
            Alignment::Top => target,
            Alignment::Center => target.saturating_sub(self.visible_count / 2),
            Alignment::Bottom => (target + 1).saturating_sub(self.visible_count),
            Alignment::Auto => compute_sync_offset(target, self.offset, self.visible_count),
        };
        self.set_offset(alignment.as_str(), raw);
        self.resync();
        Transition {
            before,
            after: self.viewport(),
        }
    }

    /// Clamp the offset down after the list or the viewport shrank, then
    /// re-sync the selection.
    pub fn remeasure(&mut self) -> Transition {
        let before = self.viewport();
        self.clamp_to_max();
        self.resync();
        Transition {
            before,
            after: self.viewport(),
        }
    }

    fn clamp_to_max(&mut self) {
        let max = max_offset(self.total_count, self.visible_count);
        if self.offset > max {
            debug!(
                target: "viewport",
                from = self.offset,
                to = max,
                total = self.total_count,
                visible = self.visible_count,
                "offset_clamped"
            );
            self.offset = max;
        }
    }

    fn resync(&mut self) {
        let selected = self.selected_index();
        self.set_offset("sync", compute_sync_offset(selected, self.offset, self.visible_count));
    }

    fn clamp(&self, raw: usize) -> usize {
        raw.min(max_offset(self.total_count, self.visible_count))
    }

    fn set_offset(&mut self, kind: &'static str, raw: usize) {
        let next = self.clamp(raw);
        if next != self.offset {
            trace!(target: "viewport", kind, from = self.offset, to = next, "offset_changed");
            self.offset = next;
        }
    }
}
