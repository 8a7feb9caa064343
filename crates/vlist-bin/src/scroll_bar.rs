//! Position bar appended below the list when `--scrollbar` is given.

use core_viewport::ViewportState;

const TRACK: char = '─';
const THUMB: char = '━';

/// One line: a `width`-cell track with a thumb proportional to the visible
/// share, followed by the visible range.
pub fn position_line(viewport: &ViewportState, width: usize) -> String {
    let range = viewport.visible_range();
    if range.is_empty() {
        return format!("{} 0/0", TRACK.to_string().repeat(width));
    }
    let total = viewport.total_count;
    let thumb = (width * range.len() / total).clamp(1, width.max(1));
    let start = (width * range.start / total).min(width.saturating_sub(thumb));
    let mut track = String::with_capacity(width * 3);
    for cell in 0..width {
        track.push(if cell >= start && cell < start + thumb {
            THUMB
        } else {
            TRACK
        });
    }
    format!("{track} {}-{}/{}", range.start + 1, range.end, total)
}

pub fn renderer(width: usize) -> impl Fn(&ViewportState) -> Vec<String> + 'static {
    move |viewport| vec![position_line(viewport, width)]
}
