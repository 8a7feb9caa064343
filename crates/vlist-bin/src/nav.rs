//! Key bindings for the list browser and the selection arithmetic behind them.

use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_viewport::Alignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    Up,
    Down,
    PageUp,
    PageDown,
    First,
    Last,
    /// Scroll the selection into the given alignment without moving it.
    Align(Alignment),
    Remeasure,
    Quit,
}

pub fn command_for_key(key: &KeyEvent) -> Option<ListCommand> {
    if key.mods.contains(KeyModifiers::CTRL) {
        return match key.code {
            KeyCode::Char('c') => Some(ListCommand::Quit),
            _ => None,
        };
    }
    let cmd = match key.code {
        KeyCode::Up | KeyCode::Char('k') => ListCommand::Up,
        KeyCode::Down | KeyCode::Char('j') => ListCommand::Down,
        KeyCode::PageUp => ListCommand::PageUp,
        KeyCode::PageDown => ListCommand::PageDown,
        KeyCode::Home | KeyCode::Char('g') => ListCommand::First,
        KeyCode::End | KeyCode::Char('G') => ListCommand::Last,
        KeyCode::Char('t') => ListCommand::Align(Alignment::Top),
        KeyCode::Char('c') => ListCommand::Align(Alignment::Center),
        KeyCode::Char('b') => ListCommand::Align(Alignment::Bottom),
        KeyCode::Char('r') => ListCommand::Remeasure,
        KeyCode::Char('q') | KeyCode::Esc => ListCommand::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Selection after a movement command. Non-movement commands leave it as is.
/// `page` is the number of visible items; a zero page moves by one.
pub fn next_selection(cmd: ListCommand, selected: usize, total: usize, page: usize) -> usize {
    let last = total.saturating_sub(1);
    let page = page.max(1);
    let next = match cmd {
        ListCommand::Up => selected.saturating_sub(1),
        ListCommand::Down => selected.saturating_add(1),
        ListCommand::PageUp => selected.saturating_sub(page),
        ListCommand::PageDown => selected.saturating_add(page),
        ListCommand::First => 0,
        ListCommand::Last => last,
        _ => selected,
    };
    next.min(last)
}
