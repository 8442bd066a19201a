//! Frame -> terminal command translation.
//!
//! A `Writer` is a short-lived list of primitive terminal operations built
//! from a composed `Frame` and flushed once. Every row starts with an absolute
//! `MoveTo` and a line clear, so a mis-measured glyph never shifts later rows.
//! Consecutive cells sharing a style are coalesced into one `Print`.

use crate::frame::{CellStyle, Frame};
use anyhow::Result;
use core_state::Severity;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearLine,
    Style(CellStyle),
    Print(String),
    ShowCursor(u16, u16),
    HideCursor,
}

#[derive(Debug, Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn from_frame(frame: &Frame) -> Self {
        let mut w = Self::new();
        w.cmds.push(Command::HideCursor);
        for y in 0..frame.height {
            w.cmds.push(Command::MoveTo(0, y));
            w.cmds.push(Command::ClearLine);
            let mut style: Option<CellStyle> = None;
            let mut run = String::new();
            for cell in frame.row(y).iter().filter(|c| !c.is_continuation()) {
                if style != Some(cell.style) {
                    w.print(std::mem::take(&mut run));
                    w.cmds.push(Command::Style(cell.style));
                    style = Some(cell.style);
                }
                run.push(cell.ch);
            }
            w.print(run);
        }
        w.cmds.push(Command::Style(CellStyle::Text));
        if let Some((x, y)) = frame.cursor {
            w.cmds.push(Command::ShowCursor(x, y));
        }
        w
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Style(style) => apply_style(out, style)?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::ShowCursor(x, y) => queue!(out, MoveTo(x, y), Show)?,
                Command::HideCursor => queue!(out, Hide)?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn apply_style<W: Write>(out: &mut W, style: CellStyle) -> Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    match style {
        CellStyle::Text => {}
        CellStyle::Tab => queue!(out, SetBackgroundColor(Color::DarkGrey))?,
        CellStyle::Filler => queue!(out, SetForegroundColor(Color::DarkBlue))?,
        CellStyle::Status => queue!(out, SetAttribute(Attribute::Reverse))?,
        CellStyle::Message(severity) => {
            let (fg, bg) = match severity {
                Severity::Log => (Color::Black, Color::Grey),
                Severity::Warn => (Color::Black, Color::Yellow),
                Severity::Error => (Color::White, Color::DarkRed),
            };
            queue!(out, SetForegroundColor(fg), SetBackgroundColor(bg))?;
        }
    }
    Ok(())
}

/// Paint a whole frame to `out` in one flush.
pub fn paint<W: Write>(out: &mut W, frame: &Frame) -> Result<()> {
    Writer::from_frame(frame).flush_to(out)
}
