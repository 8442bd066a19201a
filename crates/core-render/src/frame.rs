//! Full-frame composition.
//!
//! A `Frame` is a logical grid of cells the size of the terminal. Rows
//! `0..height-1` show the viewport window onto the buffer; the last row is
//! the status line with the newest message overlaid right-aligned, just left
//! of the `row:col` label.
//!
//! Invariants:
//! - Leader cells carry a printable char; a double-width char is followed by
//!   one continuation cell (`Cell::is_continuation`) that never prints.
//! - A tab occupies exactly one `CellStyle::Tab` cell (columns are character
//!   columns, matching the viewport).
//! - Rows past the end of the buffer start with a `~` filler cell.
//! - The cursor cell is on screen whenever its line is in the window; on
//!   lines with wide chars the drawn start column moves right past the
//!   viewport offset as needed.

use crate::status::{StatusContext, build_status, message_overlay, position_label, truncate_to_width};
use core_config::Config;
use core_model::EditorModel;
use core_state::Severity;
use core_text::{Buffer, Position};
use tracing::trace;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellStyle {
    #[default]
    Text,
    Tab,
    Filler,
    Status,
    Message(Severity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::Text,
        }
    }
}

impl Cell {
    const CONTINUATION: char = '\0';

    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// Trailing half of a double-width char.
    pub fn is_continuation(&self) -> bool {
        self.ch == Self::CONTINUATION
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
    /// Cursor position in frame coordinates, `None` when off-screen.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
            cursor: None,
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.cells[idx] = cell;
        }
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Printable text of a row (continuations skipped, tabs shown as spaces).
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .iter()
            .filter(|c| !c.is_continuation())
            .map(|c| c.ch)
            .collect()
    }

    /// Write `text` starting at `x`, stopping at the right edge. Returns the
    /// column after the last written cell.
    fn put_str(&mut self, mut x: u16, y: u16, text: &str, style: CellStyle) -> u16 {
        for c in text.chars() {
            match self.put_char(x, y, c, style) {
                Some(next) => x = next,
                None => break,
            }
        }
        x
    }

    /// Place one char. Returns the next column, or `None` when it does not
    /// fit.
    fn put_char(&mut self, x: u16, y: u16, c: char, style: CellStyle) -> Option<u16> {
        let (shown, style, w) = match c {
            '\t' => (' ', CellStyle::Tab, 1),
            c if c.is_control() => ('?', style, 1),
            c => (c, style, c.width().unwrap_or(1).max(1) as u16),
        };
        if x as u32 + w as u32 > self.width as u32 {
            return None;
        }
        self.set(x, y, Cell::new(shown, style));
        for i in 1..w {
            self.set(x + i, y, Cell::new(Cell::CONTINUATION, style));
        }
        Some(x + w)
    }
}

/// Cells a buffer char occupies as laid out by `compose_frame`.
fn cell_width(c: char) -> usize {
    match c {
        '\t' => 1,
        c if c.is_control() => 1,
        c => c.width().unwrap_or(1).max(1),
    }
}

/// First char column to draw. The viewport scrolls by chars, so wide chars
/// can still push the cursor past the right edge; advance until the cursor
/// cell fits. Returns the start column and the cursor's x offset.
fn scroll_start(buf: &Buffer, cursor: Position, offset_col: usize, width: usize) -> (usize, usize) {
    let mut start = offset_col.min(cursor.col);
    let chars = buf.line_chars(cursor.line, start, cursor.col + 1 - start);
    let before = (cursor.col - start).min(chars.len());
    let cursor_w = chars.get(cursor.col - start).map_or(1, |&c| cell_width(c));
    let mut x: usize = chars[..before].iter().map(|&c| cell_width(c)).sum();
    let mut dropped = 0;
    while x + cursor_w > width && dropped < before {
        x -= cell_width(chars[dropped]);
        dropped += 1;
        start += 1;
    }
    (start, x)
}

/// Build the frame for the current model. `height` includes the status row.
pub fn compose_frame(model: &EditorModel, config: &Config, width: u16, height: u16) -> Frame {
    let mut frame = Frame::new(width, height);
    if width == 0 || height == 0 {
        return frame;
    }
    let state = model.state();
    let view = model.view();
    let buf = state.buffer();
    let vp = view.viewport;
    let text_rows = height - 1;
    let cursor = view.cursor;
    let cursor_visible = cursor.line >= vp.offset_row
        && cursor.line < vp.offset_row + text_rows as usize
        && cursor.line < buf.line_count();
    let (start_col, cursor_x) = if cursor_visible {
        scroll_start(buf, cursor, vp.offset_col, width as usize)
    } else {
        (vp.offset_col, 0)
    };

    for y in 0..text_rows {
        let row = vp.offset_row + y as usize;
        if row >= buf.line_count() {
            frame.set(0, y, Cell::new('~', CellStyle::Filler));
            continue;
        }
        let mut x = 0u16;
        for c in buf.line_chars(row, start_col, width as usize) {
            match frame.put_char(x, y, c, CellStyle::Text) {
                Some(next) => x = next,
                None => break,
            }
        }
    }

    if cursor_visible && cursor_x < width as usize {
        frame.cursor = Some((cursor_x as u16, (cursor.line - vp.offset_row) as u16));
    }

    let status_y = height - 1;
    let ctx = StatusContext::from_model(model, config.file_name_max());
    let status = build_status(&ctx, width as usize);
    frame.put_str(0, status_y, &status, CellStyle::Status);

    if let Some(overlay) = message_overlay(&state.messages) {
        let label_w = position_label(cursor.line + 1, cursor.col + 1).width();
        let avail = (width as usize).saturating_sub(label_w + 2);
        let text = truncate_to_width(&overlay.text, avail);
        let start = avail - text.width();
        let label_x = (width as usize).saturating_sub(label_w);
        for x in start..label_x {
            frame.set(x as u16, status_y, Cell::new(' ', CellStyle::Status));
        }
        frame.put_str(
            start as u16,
            status_y,
            &text,
            CellStyle::Message(overlay.severity),
        );
    }

    trace!(
        target: "render",
        width,
        height,
        offset_row = vp.offset_row,
        offset_col = vp.offset_col,
        start_col,
        cursor = ?frame.cursor,
        "frame_composed"
    );
    frame
}
