//! Terminal writer.
//!
//! Collects primitive terminal operations for one frame and emits them in a
//! single flush. Positions are absolute with a (0,0) origin; callers keep
//! them in bounds. The writer owns no global state and lives for one frame.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearAll,
    Print(String),
    /// Text drawn in reverse video.
    PrintReverse(String),
    ShowCursorAt(u16, u16),
    HideCursor,
}

#[derive(Default)]
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
    pub fn clear_all(&mut self) {
        self.cmds.push(Command::ClearAll);
    }
    pub fn print<S: Into<String>>(&mut self, s: S, reverse: bool) {
        let s: String = s.into();
        if s.is_empty() {
            return;
        }
        self.cmds.push(if reverse {
            Command::PrintReverse(s)
        } else {
            Command::Print(s)
        });
    }
    pub fn show_cursor_at(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::ShowCursorAt(x, y));
    }
    pub fn hide_cursor(&mut self) {
        self.cmds.push(Command::HideCursor);
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearAll => queue!(out, Clear(ClearType::All))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::PrintReverse(s) => queue!(
                    out,
                    SetAttribute(Attribute::Reverse),
                    Print(s),
                    SetAttribute(Attribute::NoReverse)
                )?,
                Command::ShowCursorAt(x, y) => queue!(out, MoveTo(x, y), Show)?,
                Command::HideCursor => queue!(out, Hide)?,
            }
        }
        out.flush()?;
        Ok(())
    }
}
