//! Async input service: crossterm `EventStream` -> `core_events::Event`.

mod async_service;
pub use async_service::AsyncInputShutdown;

use async_service::spawn_async_event_task;

use core_events::{Event, InputEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{KeyCode as CKeyCode, KeyModifiers as CMods};
use tokio::task::JoinHandle;

/// Spawn the async input service backed by `crossterm::EventStream`.
///
/// Returns the `JoinHandle` for the background task alongside a shutdown handle
/// that can be used to request immediate termination.
pub fn spawn_async_input(
    sender: tokio::sync::mpsc::Sender<Event>,
) -> (JoinHandle<()>, AsyncInputShutdown) {
    spawn_async_event_task(sender)
}

#[inline]
pub(crate) fn build_key_event(code: KeyCode, mods: KeyModifiers) -> Event {
    Event::Input(InputEvent::Key(KeyEvent { code, mods }))
}

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

/// Keys outside the list vocabulary (function keys, media keys, ...) map to `None`.
pub(crate) fn map_key_code(code: &CKeyCode) -> Option<KeyCode> {
    let mapped = match code {
        CKeyCode::Char(c) => KeyCode::Char(*c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    Some(mapped)
}
