//! Environment size source.
//!
//! Produces an initial synchronous reading followed by updates whenever the
//! runtime forwards a terminal resize. Readings travel through a
//! `tokio::sync::watch` channel: subscribers can poll the latest value without
//! blocking (`take_update`) or await the next change (`changed`).
//!
//! Non-interactive output (stdout is not a TTY, or the size query fails)
//! degrades to static defaults of 24 rows x 80 columns. A static source never
//! publishes an update; that is the expected steady state, not a failure.
//!
//! Zero readings are published as-is. Consumers floor them (the capacity
//! resolver never yields a negative or zero fill height).

use std::io::IsTerminal;
use tokio::sync::watch;
use tracing::{debug, trace};

pub const DEFAULT_ROWS: u16 = 24;
pub const DEFAULT_COLUMNS: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalSize {
    pub rows: u16,
    pub columns: u16,
}

impl Default for TerminalSize {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
        }
    }
}

impl TerminalSize {
    pub const fn new(rows: u16, columns: u16) -> Self {
        Self { rows, columns }
    }
}

#[derive(Debug)]
pub struct SizeSource {
    tx: watch::Sender<TerminalSize>,
    interactive: bool,
}

impl SizeSource {
    /// Probe stdout. Falls back to a static default source when stdout is not
    /// a terminal or the size query fails.
    pub fn detect() -> Self {
        if !std::io::stdout().is_terminal() {
            debug!(target: "terminal.size", "stdout_not_tty_static_defaults");
            return Self::fixed(TerminalSize::default());
        }
        match crossterm::terminal::size() {
            Ok((columns, rows)) => Self::interactive(TerminalSize::new(rows, columns)),
            Err(e) => {
                debug!(target: "terminal.size", error = %e, "size_query_failed_static_defaults");
                Self::fixed(TerminalSize::default())
            }
        }
    }

    /// Source that accepts resize notifications.
    pub fn interactive(initial: TerminalSize) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            interactive: true,
        }
    }

    /// Source that never changes.
    pub fn fixed(size: TerminalSize) -> Self {
        let (tx, _rx) = watch::channel(size);
        Self {
            tx,
            interactive: false,
        }
    }

    pub fn current(&self) -> TerminalSize {
        *self.tx.borrow()
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn subscribe(&self) -> SizeSubscription {
        let rx = self.tx.subscribe();
        trace!(
            target: "terminal.size",
            listeners = self.tx.receiver_count(),
            "size_listener_registered"
        );
        SizeSubscription { rx }
    }

    /// Live listener count (dropped subscriptions are not counted).
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish a resize reading. Returns true when subscribers were notified;
    /// identical readings and static sources notify nobody.
    pub fn apply_resize(&self, columns: u16, rows: u16) -> bool {
        if !self.interactive {
            trace!(target: "terminal.size", columns, rows, "resize_ignored_static_source");
            return false;
        }
        let next = TerminalSize::new(rows, columns);
        let changed = self.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
        if changed {
            debug!(target: "terminal.size", columns, rows, "resize_published");
        }
        changed
    }
}

/// Registered listener. Dropping it deregisters from the source.
#[derive(Debug)]
pub struct SizeSubscription {
    rx: watch::Receiver<TerminalSize>,
}

impl SizeSubscription {
    /// Latest reading without marking it seen.
    pub fn current(&self) -> TerminalSize {
        *self.rx.borrow()
    }

    /// Non-blocking: the newest reading if one arrived since the last call.
    pub fn take_update(&mut self) -> Option<TerminalSize> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }

    /// Await the next reading. `None` once the source is gone.
    pub async fn changed(&mut self) -> Option<TerminalSize> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

impl Drop for SizeSubscription {
    fn drop(&mut self) {
        trace!(target: "terminal.size", "size_listener_released");
    }
}
