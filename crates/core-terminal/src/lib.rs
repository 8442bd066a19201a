//! Terminal backend and key source over crossterm.
//!
//! `CrosstermBackend` switches the terminal into raw mode on the alternate
//! screen. `TerminalSession` holds a backend for the lifetime of the editor
//! loop and puts the terminal back when dropped, including on early return.
//! `CrosstermKeySource` is the blocking `KeySource` used by the binary.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    queue,
    style::ResetColor,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
        disable_raw_mode, enable_raw_mode,
    },
};
use std::io::{Write, stdout};
use tracing::{debug, warn};

pub mod input;
pub use input::{CrosstermKeySource, map_key_event};

/// Screen lifecycle plus size queries. Painting goes straight to stdout.
pub trait TerminalBackend {
    fn acquire(&mut self) -> Result<()>;
    fn release(&mut self) -> Result<()>;
    fn set_title(&mut self, title: &str) -> Result<()>;
    /// Current size as `(cols, rows)`.
    fn size(&self) -> Result<(u16, u16)>;
}

#[derive(Debug, Default)]
pub struct CrosstermBackend {
    raw: bool,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }
}

impl TerminalBackend for CrosstermBackend {
    fn acquire(&mut self) -> Result<()> {
        if self.raw {
            return Ok(());
        }
        enable_raw_mode()?;
        let mut out = stdout();
        queue!(out, EnterAlternateScreen, Clear(ClearType::All), Hide)?;
        out.flush()?;
        self.raw = true;
        debug!(target: "terminal", "raw_mode_on");
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        if !self.raw {
            return Ok(());
        }
        let mut out = stdout();
        queue!(out, ResetColor, Show, LeaveAlternateScreen)?;
        out.flush()?;
        disable_raw_mode()?;
        self.raw = false;
        debug!(target: "terminal", "raw_mode_off");
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        let mut out = stdout();
        queue!(out, SetTitle(title))?;
        out.flush()?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }
}

/// Window title for an editing session.
pub fn session_title(file_name: Option<&str>) -> String {
    match file_name {
        Some(name) => format!("oxed: {name}"),
        None => "oxed".to_string(),
    }
}

/// Owns an acquired backend; releases it on drop.
pub struct TerminalSession<B: TerminalBackend> {
    backend: B,
}

impl<B: TerminalBackend> TerminalSession<B> {
    pub fn open(mut backend: B, title: &str) -> Result<Self> {
        backend.set_title(title)?;
        backend.acquire()?;
        Ok(Self { backend })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: TerminalBackend> Drop for TerminalSession<B> {
    fn drop(&mut self) {
        if let Err(e) = self.backend.release() {
            warn!(target: "terminal", error = %e, "release_failed");
        }
    }
}
