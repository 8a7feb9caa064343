//! Core event types and channel policy for the list runtime.

use std::fmt;
use std::sync::atomic::AtomicU64;

// -------------------------------------------------------------------------------------------------
// Channel Policy
// -------------------------------------------------------------------------------------------------
// The event loop uses a bounded mpsc channel sized by `EVENT_CHANNEL_CAP`. The input task awaits
// `send` (parks until space is available) rather than dropping events; with a single producer and
// a single consumer latency stays low and no navigation key is lost.
// -------------------------------------------------------------------------------------------------
pub const EVENT_CHANNEL_CAP: usize = 1024;

// -------------------------------------------------------------------------------------------------
// Telemetry
// -------------------------------------------------------------------------------------------------
// Relaxed atomic counters, inspected by tests and logged at shutdown.
// -------------------------------------------------------------------------------------------------
pub static CHANNEL_SEND_FAILURES: AtomicU64 = AtomicU64::new(0);
pub static CHANNEL_SENDS: AtomicU64 = AtomicU64::new(0);
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0);
pub static RESIZE_TOTAL: AtomicU64 = AtomicU64::new(0);
// Async input task lifecycle
pub static ASYNC_INPUT_STARTS: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_SIGNAL: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_CHANNEL: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_STREAM: AtomicU64 = AtomicU64::new(0);
pub static ASYNC_INPUT_STOP_ERROR: AtomicU64 = AtomicU64::new(0);

/// Top-level event enum consumed by the central event loop.
#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
}

/// Normalized input events.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
    /// Interrupt (Ctrl-C) surfaced distinctly so it always quits.
    CtrlC,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }
}

/// Logical keys the list runtime reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn key_event_display() {
        let k = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CTRL);
        let s = format!("{}", k);
        assert!(s.contains("Char"));
        assert!(s.contains("CTRL"));
    }

    #[test]
    fn plain_key_has_no_modifiers() {
        let k = KeyEvent::plain(KeyCode::PageDown);
        assert!(k.mods.is_empty());
        assert_eq!(k.code, KeyCode::PageDown);
    }

    #[tokio::test]
    async fn bounded_channel_preserves_order() {
        let (tx, mut rx) = mpsc::channel::<Event>(4);
        tx.send(Event::Input(InputEvent::Key(KeyEvent::plain(KeyCode::Down))))
            .await
            .unwrap();
        tx.send(Event::Input(InputEvent::Resize(100, 30)))
            .await
            .unwrap();
        tx.send(Event::Input(InputEvent::CtrlC)).await.unwrap();
        drop(tx);

        let mut got = Vec::new();
        while let Some(ev) = rx.recv().await {
            got.push(ev);
        }
        assert!(matches!(
            got.as_slice(),
            [
                Event::Input(InputEvent::Key(KeyEvent {
                    code: KeyCode::Down,
                    ..
                })),
                Event::Input(InputEvent::Resize(100, 30)),
                Event::Input(InputEvent::CtrlC),
            ]
        ));
    }
}
