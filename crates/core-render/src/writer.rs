//! Terminal writer: batches primitive terminal commands for one frame and
//! flushes them in order to any `io::Write`.
//!
//! Positions are absolute with a (0,0) origin; callers keep them in bounds.
//! The writer is a short-lived value built per frame.

use crate::frame::{LineKind, ListFrame};
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::Write;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    /// Clears the current line; always preceded by `MoveTo(0, y)`.
    ClearLine(u16),
    Print(String),
    Dim(bool),
    Reverse(bool),
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn clear_line(&mut self, y: u16) {
        self.cmds.push(Command::ClearLine(y));
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn dim(&mut self, on: bool) {
        self.cmds.push(Command::Dim(on));
    }

    pub fn reverse(&mut self, on: bool) {
        self.cmds.push(Command::Reverse(on));
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    /// Queue a full repaint of `frame` into the rows `[origin_row,
    /// origin_row + region_rows)`. Rows past the frame are cleared so a
    /// shrinking list leaves nothing behind.
    pub fn paint_frame(&mut self, frame: &ListFrame, origin_row: u16, region_rows: u16) {
        let region = region_rows as usize;
        for (i, line) in frame.lines.iter().take(region).enumerate() {
            let y = origin_row.saturating_add(i as u16);
            self.move_to(0, y);
            self.clear_line(y);
            match line.kind {
                LineKind::OverflowTop | LineKind::OverflowBottom => {
                    self.dim(true);
                    self.print(line.text.as_str());
                    self.dim(false);
                }
                LineKind::Item { selected: true, .. } => {
                    self.reverse(true);
                    self.print(line.text.as_str());
                    self.reverse(false);
                }
                _ => self.print(line.text.as_str()),
            }
        }
        for i in frame.len().min(region)..region {
            let y = origin_row.saturating_add(i as u16);
            self.move_to(0, y);
            self.clear_line(y);
        }
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        trace!(target: "render.writer", commands = self.cmds.len(), "flush");
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::ClearLine(_) => {
                    queue!(out, Clear(ClearType::CurrentLine))?;
                }
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
                Command::Dim(on) => {
                    let attr = if on {
                        Attribute::Dim
                    } else {
                        Attribute::NormalIntensity
                    };
                    queue!(out, SetAttribute(attr))?;
                }
                Command::Reverse(on) => {
                    let attr = if on {
                        Attribute::Reverse
                    } else {
                        Attribute::NoReverse
                    };
                    queue!(out, SetAttribute(attr))?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}
