//! Terminal-independent browser state: the items, the caller-owned selection
//! and the `VirtualList` that windows them.

use crate::nav::{ListCommand, next_selection};
use crate::scroll_bar;
use anyhow::{Context, Result};
use core_config::ListConfig;
use core_render::{ListFrame, RenderItemProps, VirtualList};
use core_terminal::SizeSubscription;
use std::path::Path;
use tracing::{debug, trace};

pub const GENERATED_ITEM_COUNT: usize = 1000;

/// Outcome of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

pub fn generated_items(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Item {i}")).collect()
}

/// One item per line; a trailing newline does not add an empty item.
pub fn load_items(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading items from {}", path.display()))?;
    let items: Vec<String> = content.lines().map(str::to_owned).collect();
    debug!(target: "io", file = %path.display(), items = items.len(), "items_loaded");
    Ok(items)
}

fn render_row(props: RenderItemProps<'_, String>) -> String {
    let marker = if props.is_selected { '>' } else { ' ' };
    format!("{marker} {:>5}  {}", props.index, props.item)
}

pub struct ListSession {
    items: Vec<String>,
    selected: usize,
    list: VirtualList<String>,
}

impl ListSession {
    pub fn new(
        items: Vec<String>,
        config: ListConfig,
        scroll_bar_width: Option<usize>,
        size: SizeSubscription,
    ) -> Self {
        let mut builder = VirtualList::builder(render_row).config(config);
        if let Some(width) = scroll_bar_width {
            builder = builder.scroll_bar(scroll_bar::renderer(width));
        }
        let list = builder
            .on_viewport_change(|vp| {
                debug!(
                    target: "runtime",
                    offset = vp.offset,
                    visible = vp.visible_count,
                    total = vp.total_count,
                    "viewport"
                );
            })
            .mount(size, items.len(), 0);
        Self {
            items,
            selected: 0,
            list,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn list(&self) -> &VirtualList<String> {
        &self.list
    }

    pub fn apply(&mut self, cmd: ListCommand) -> Step {
        trace!(target: "runtime", ?cmd, selected = self.selected, "list_command");
        match cmd {
            ListCommand::Quit => return Step::Quit,
            ListCommand::Align(alignment) => {
                self.list.scroll_to_index(self.selected, alignment);
            }
            ListCommand::Remeasure => {
                self.list.remeasure();
            }
            movement => {
                let page = self.list.viewport().visible_count;
                self.selected = next_selection(movement, self.selected, self.items.len(), page);
            }
        }
        Step::Continue
    }

    /// Environment changed; re-resolve capacity and clamp.
    pub fn on_resize(&mut self) {
        self.list.remeasure();
    }

    pub fn frame(&mut self) -> ListFrame {
        self.list.render(&self.items, self.selected)
    }

    pub fn status_line(&self) -> String {
        let vp = self.list.viewport();
        format!(
            " {}/{}  offset {}  j/k move  t/c/b align  r remeasure  q quit",
            (self.selected + 1).min(self.items.len()),
            self.items.len(),
            vp.offset
        )
    }
}
