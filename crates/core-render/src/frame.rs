//! Rendered list output: an ordered set of text rows, each tagged with what
//! produced it.

use core_viewport::ViewportState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// One row of a visible item. Multi-row items repeat key and index with an
    /// increasing `row`.
    Item {
        key: String,
        index: usize,
        selected: bool,
        row: usize,
    },
    OverflowTop,
    OverflowBottom,
    ScrollBar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLine {
    pub kind: LineKind,
    pub text: String,
}

impl FrameLine {
    pub fn is_indicator(&self) -> bool {
        matches!(self.kind, LineKind::OverflowTop | LineKind::OverflowBottom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFrame {
    pub lines: Vec<FrameLine>,
    /// State the frame was rendered from.
    pub viewport: ViewportState,
}

impl ListFrame {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn to_text(&self) -> String {
        self.texts().join("\n")
    }

    /// Absolute indices of rendered items, one entry per item (not per row).
    pub fn item_indices(&self) -> Vec<usize> {
        let mut out: Vec<usize> = Vec::new();
        for line in &self.lines {
            if let LineKind::Item { index, .. } = line.kind {
                if out.last() != Some(&index) {
                    out.push(index);
                }
            }
        }
        out
    }

    /// Keys of rendered items, one entry per item.
    pub fn item_keys(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|l| match &l.kind {
                LineKind::Item { key, row: 0, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.lines.iter().find_map(|l| match l.kind {
            LineKind::Item {
                index,
                selected: true,
                ..
            } => Some(index),
            _ => None,
        })
    }

    pub fn line_of(&self, kind: &LineKind) -> Option<&FrameLine> {
        self.lines.iter().find(|l| &l.kind == kind)
    }
}
