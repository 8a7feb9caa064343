//! Windowing core for fixed-height item lists.
//!
//! Three layers, leaves first:
//! * `capacity`: height mode + environment rows + item height -> visible slots.
//! * `engine`: the offset state machine (selection sync, imperative scroll,
//!   remeasure) that decides which contiguous slice is visible.
//! * `overflow`: "N hidden above / below" counts derived from a snapshot.
//!
//! Everything here is synchronous and allocation free; the presentation layer
//! (`core-render`) and the environment size source (`core-terminal`) sit on top.
//!
//! Core invariants (must hold after every public call):
//! * `0 <= offset <= max(0, total_count - visible_count)`.
//! * The visible slice is `[offset, offset + visible_count) ∩ [0, total_count)`.
//! * `above == offset` and `below == max(0, total_count - offset - visible_count)`.

pub mod capacity;
pub mod engine;
pub mod overflow;

pub use capacity::{Capacity, CapacityRequest, INDICATOR_ROWS, resolve_capacity, resolved_height};
pub use engine::{
    Alignment, Transition, ViewportEngine, ViewportInputs, ViewportState, clamp_selection,
    compute_sync_offset, max_offset,
};
pub use overflow::OverflowCounts;
