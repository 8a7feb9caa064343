//! `VirtualList<T>`: binds the capacity resolver, the viewport engine and the
//! caller's renderers into a frame of text rows.
//!
//! The list never owns the items. Callers hand in the current slice and
//! selection on every `render`; the engine decides which contiguous window is
//! shown and only those items reach the item renderer.

use crate::clip::clip_rows;
use crate::clip::truncate_to_width;
use crate::frame::{FrameLine, LineKind, ListFrame};
use core_config::ListConfig;
use core_terminal::{SizeSubscription, TerminalSize};
use core_viewport::{
    Alignment, Capacity, CapacityRequest, ViewportEngine, ViewportInputs, ViewportState,
    resolve_capacity,
};
use tracing::{debug, trace};

/// What the item renderer sees for one visible item.
#[derive(Debug)]
pub struct RenderItemProps<'a, T> {
    pub item: &'a T,
    /// Absolute index in the full list.
    pub index: usize,
    pub is_selected: bool,
}

pub type ItemRenderer<T> = Box<dyn Fn(RenderItemProps<'_, T>) -> String>;
pub type KeyExtractor<T> = Box<dyn Fn(&T, usize) -> String>;
pub type OverflowRenderer = Box<dyn Fn(usize) -> String>;
pub type ScrollBarRenderer = Box<dyn Fn(&ViewportState) -> Vec<String>>;
pub type ViewportObserver = Box<dyn FnMut(ViewportState)>;

pub fn default_overflow_top(count: usize) -> String {
    format!("  ▲ {count} more")
}

pub fn default_overflow_bottom(count: usize) -> String {
    format!("  ▼ {count} more")
}

pub struct VirtualListBuilder<T> {
    config: ListConfig,
    render_item: ItemRenderer<T>,
    key_extractor: Option<KeyExtractor<T>>,
    overflow_top: Option<OverflowRenderer>,
    overflow_bottom: Option<OverflowRenderer>,
    scroll_bar: Option<ScrollBarRenderer>,
    on_viewport_change: Option<ViewportObserver>,
}

impl<T> VirtualListBuilder<T> {
    pub fn new(render_item: impl Fn(RenderItemProps<'_, T>) -> String + 'static) -> Self {
        Self {
            config: ListConfig::default(),
            render_item: Box::new(render_item),
            key_extractor: None,
            overflow_top: None,
            overflow_bottom: None,
            scroll_bar: None,
            on_viewport_change: None,
        }
    }

    pub fn config(mut self, config: ListConfig) -> Self {
        self.config = config;
        self
    }

    pub fn key_extractor(mut self, f: impl Fn(&T, usize) -> String + 'static) -> Self {
        self.key_extractor = Some(Box::new(f));
        self
    }

    pub fn overflow_top(mut self, f: impl Fn(usize) -> String + 'static) -> Self {
        self.overflow_top = Some(Box::new(f));
        self
    }

    pub fn overflow_bottom(mut self, f: impl Fn(usize) -> String + 'static) -> Self {
        self.overflow_bottom = Some(Box::new(f));
        self
    }

    pub fn scroll_bar(mut self, f: impl Fn(&ViewportState) -> Vec<String> + 'static) -> Self {
        self.scroll_bar = Some(Box::new(f));
        self
    }

    pub fn on_viewport_change(mut self, f: impl FnMut(ViewportState) + 'static) -> Self {
        self.on_viewport_change = Some(Box::new(f));
        self
    }

    /// Resolve the initial capacity, place the initial offset so the
    /// selection is visible, and notify the observer once.
    pub fn mount(
        self,
        size: SizeSubscription,
        total_count: usize,
        selected_index: usize,
    ) -> VirtualList<T> {
        let environment = size.current();
        let capacity = resolve_capacity(&CapacityRequest::from_config(
            &self.config,
            environment.rows,
        ));
        let engine = ViewportEngine::new(ViewportInputs::new(
            total_count,
            capacity.visible_count,
            selected_index,
        ));
        debug!(
            target: "render.list",
            rows = environment.rows,
            columns = environment.columns,
            resolved_height = capacity.resolved_height,
            visible = capacity.visible_count,
            "list_mounted"
        );
        let mut list = VirtualList {
            config: self.config,
            render_item: self.render_item,
            key_extractor: self.key_extractor,
            overflow_top: self.overflow_top,
            overflow_bottom: self.overflow_bottom,
            scroll_bar: self.scroll_bar,
            on_viewport_change: self.on_viewport_change,
            size,
            environment,
            capacity,
            engine,
            last_notified: None,
        };
        list.notify();
        list
    }
}

pub struct VirtualList<T> {
    config: ListConfig,
    render_item: ItemRenderer<T>,
    key_extractor: Option<KeyExtractor<T>>,
    overflow_top: Option<OverflowRenderer>,
    overflow_bottom: Option<OverflowRenderer>,
    scroll_bar: Option<ScrollBarRenderer>,
    on_viewport_change: Option<ViewportObserver>,
    size: SizeSubscription,
    environment: TerminalSize,
    capacity: Capacity,
    engine: ViewportEngine,
    last_notified: Option<ViewportState>,
}

impl<T> VirtualList<T> {
    pub fn builder(
        render_item: impl Fn(RenderItemProps<'_, T>) -> String + 'static,
    ) -> VirtualListBuilder<T> {
        VirtualListBuilder::new(render_item)
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Last environment reading the capacity was resolved against.
    pub fn environment(&self) -> TerminalSize {
        self.environment
    }

    /// Current viewport snapshot. Pure read.
    pub fn viewport(&self) -> ViewportState {
        self.engine.viewport()
    }

    /// Scroll so `index` sits at the requested alignment. The selection is
    /// left alone and stays on screen, so a target too far from it is only
    /// approached.
    pub fn scroll_to_index(&mut self, index: usize, alignment: Alignment) -> ViewportState {
        self.engine.scroll_to_index(index, alignment);
        self.notify();
        self.engine.viewport()
    }

    /// Re-read the environment, resolve capacity again, clamp the offset and
    /// re-sync the selection.
    pub fn remeasure(&mut self) -> ViewportState {
        self.refresh_environment();
        let inputs = ViewportInputs {
            visible_count: self.capacity.visible_count,
            ..self.engine.inputs()
        };
        self.engine.update(inputs);
        self.engine.remeasure();
        self.notify();
        self.engine.viewport()
    }

    /// Compose the frame for the current items and selection.
    pub fn render(&mut self, items: &[T], selected_index: usize) -> ListFrame {
        self.refresh_environment();
        self.engine.update(ViewportInputs::new(
            items.len(),
            self.capacity.visible_count,
            selected_index,
        ));
        self.notify();
        self.compose(items)
    }

    fn refresh_environment(&mut self) {
        let Some(next) = self.size.take_update() else {
            return;
        };
        self.environment = next;
        let capacity = resolve_capacity(&CapacityRequest::from_config(&self.config, next.rows));
        if capacity != self.capacity {
            debug!(
                target: "render.list",
                rows = next.rows,
                from = self.capacity.visible_count,
                to = capacity.visible_count,
                "capacity_changed"
            );
        }
        self.capacity = capacity;
    }

    fn notify(&mut self) {
        let viewport = self.engine.viewport();
        if self.last_notified == Some(viewport) {
            return;
        }
        self.last_notified = Some(viewport);
        trace!(
            target: "render.list",
            offset = viewport.offset,
            visible = viewport.visible_count,
            total = viewport.total_count,
            "viewport_changed"
        );
        if let Some(observer) = self.on_viewport_change.as_mut() {
            observer(viewport);
        }
    }

    fn compose(&self, items: &[T]) -> ListFrame {
        let viewport = self.engine.viewport();
        let overflow = viewport.overflow();
        let columns = self.environment.columns as usize;
        let item_rows = self.capacity.item_height.get();
        let selected = self.engine.selected_index();
        let indicators = self.config.show_overflow_indicators;
        let mut lines = Vec::new();

        if indicators && overflow.has_above() {
            let text = match &self.overflow_top {
                Some(f) => f(overflow.above),
                None => default_overflow_top(overflow.above),
            };
            lines.push(FrameLine {
                kind: LineKind::OverflowTop,
                text: truncate_to_width(&text, columns).to_string(),
            });
        }

        for index in viewport.visible_range() {
            let Some(item) = items.get(index) else {
                break;
            };
            let is_selected = index == selected;
            let key = match &self.key_extractor {
                Some(f) => f(item, index),
                None => index.to_string(),
            };
            let text = (self.render_item)(RenderItemProps {
                item,
                index,
                is_selected,
            });
            for (row, text) in clip_rows(&text, item_rows, columns).into_iter().enumerate() {
                lines.push(FrameLine {
                    kind: LineKind::Item {
                        key: key.clone(),
                        index,
                        selected: is_selected,
                        row,
                    },
                    text,
                });
            }
        }

        if indicators && overflow.has_below() {
            let text = match &self.overflow_bottom {
                Some(f) => f(overflow.below),
                None => default_overflow_bottom(overflow.below),
            };
            lines.push(FrameLine {
                kind: LineKind::OverflowBottom,
                text: truncate_to_width(&text, columns).to_string(),
            });
        }

        if let Some(f) = &self.scroll_bar {
            for text in f(&viewport) {
                lines.push(FrameLine {
                    kind: LineKind::ScrollBar,
                    text: truncate_to_width(&text, columns).to_string(),
                });
            }
        }

        trace!(target: "render.list", lines = lines.len(), "frame_composed");
        ListFrame { lines, viewport }
    }
}
