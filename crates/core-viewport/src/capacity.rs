//! Capacity resolution: rows available to the list -> number of item slots.
//!
//! Arithmetic is saturating throughout so the result is never negative and
//! never panics, whatever the environment reports (0 rows included).

use core_config::{HeightMode, ItemHeight, ListConfig};

/// Rows reserved for the top + bottom overflow indicators when enabled.
pub const INDICATOR_ROWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityRequest {
    pub height: HeightMode,
    pub reserved_lines: u16,
    pub environment_rows: u16,
    pub item_height: ItemHeight,
    pub indicators: bool,
}

impl CapacityRequest {
    pub fn from_config(config: &ListConfig, environment_rows: u16) -> Self {
        Self {
            height: config.height,
            reserved_lines: config.reserved_lines,
            environment_rows,
            item_height: config.item_height,
            indicators: config.show_overflow_indicators,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Total rows granted to the list, indicators included.
    pub resolved_height: usize,
    /// Whole items that fit below the indicator budget.
    pub visible_count: usize,
    pub item_height: ItemHeight,
}

/// Rows granted to the list before the indicator budget is taken out.
///
/// `Fill` never resolves below one row.
pub fn resolved_height(height: HeightMode, reserved_lines: u16, environment_rows: u16) -> usize {
    match height {
        HeightMode::Fixed(rows) => rows as usize,
        HeightMode::Fill => (environment_rows.saturating_sub(reserved_lines) as usize).max(1),
    }
}

pub fn resolve_capacity(request: &CapacityRequest) -> Capacity {
    let resolved = resolved_height(
        request.height,
        request.reserved_lines,
        request.environment_rows,
    );
    let budget = if request.indicators { INDICATOR_ROWS } else { 0 };
    let available = resolved.saturating_sub(budget);
    Capacity {
        resolved_height: resolved,
        visible_count: available / request.item_height.get(),
        item_height: request.item_height,
    }
}
