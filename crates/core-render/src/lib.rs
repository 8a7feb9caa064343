//! Presentation layer for the windowed list.
//!
//! * `list`: `VirtualList<T>` turns items, selection and the environment size
//!   into a `ListFrame`. Only the visible slice is handed to the item renderer.
//! * `frame`: tagged text rows (item rows, overflow indicators, scrollbar).
//! * `clip`: grapheme and display-width aware truncation. Rows are clipped,
//!   never wrapped, so an item always occupies exactly `item_height` rows.
//! * `writer`: crossterm command batch that paints a frame into a region.

pub mod clip;
pub mod frame;
pub mod list;
pub mod writer;

pub use frame::{FrameLine, LineKind, ListFrame};
pub use list::{
    ItemRenderer, KeyExtractor, OverflowRenderer, RenderItemProps, ScrollBarRenderer,
    ViewportObserver, VirtualList, VirtualListBuilder, default_overflow_bottom,
    default_overflow_top,
};
pub use writer::{Command, Writer};
