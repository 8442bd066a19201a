//! High-level editor model: session state plus the single view onto it.
//!
//! A `View` owns presentation state (cursor, sticky column, viewport) so the
//! buffer-centric `EditorState` stays free of display concerns.
//!
//! Invariants (must hold after every dispatcher step):
//! * `view.cursor.line < buffer.line_count()`.
//! * `view.cursor.col <= buffer.line_len(view.cursor.line)`.
//! * After `Viewport::sync_to_cursor` the cursor lies inside the visible
//!   window (for non-zero window dimensions).

use core_state::EditorState;
use core_text::{Buffer, Position};

/// Visible window into the buffer, in lines and character columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub offset_row: usize,
    pub offset_col: usize,
    pub visible_rows: usize,
    pub visible_cols: usize,
}

impl Viewport {
    pub fn new(visible_rows: usize, visible_cols: usize) -> Self {
        Self {
            offset_row: 0,
            offset_col: 0,
            visible_rows,
            visible_cols,
        }
    }

    pub fn resize(&mut self, visible_rows: usize, visible_cols: usize) {
        self.visible_rows = visible_rows;
        self.visible_cols = visible_cols;
    }

    /// Scroll-follow: adjust offsets minimally so `cursor` is visible. Each
    /// clamp is one-directional, so calling this twice is a no-op the second time.
    /// Returns true if an offset changed.
    pub fn sync_to_cursor(&mut self, cursor: Position) -> bool {
        let before = (self.offset_row, self.offset_col);
        if cursor.line < self.offset_row {
            self.offset_row = cursor.line;
        }
        if self.visible_rows > 0 && cursor.line >= self.offset_row + self.visible_rows {
            self.offset_row = cursor.line + 1 - self.visible_rows;
        }
        if cursor.col < self.offset_col {
            self.offset_col = cursor.col;
        }
        if self.visible_cols > 0 && cursor.col >= self.offset_col + self.visible_cols {
            self.offset_col = cursor.col + 1 - self.visible_cols;
        }
        before != (self.offset_row, self.offset_col)
    }

    /// True when `pos` falls inside the window.
    pub fn contains(&self, pos: Position) -> bool {
        pos.line >= self.offset_row
            && pos.line < self.offset_row + self.visible_rows
            && pos.col >= self.offset_col
            && pos.col < self.offset_col + self.visible_cols
    }
}

#[derive(Debug, Clone, Default)]
pub struct View {
    pub cursor: Position,
    /// Last explicitly chosen column, restored by vertical motions.
    pub sticky_col: usize,
    pub viewport: Viewport,
}

impl View {
    pub fn new(cursor: Position, viewport: Viewport) -> Self {
        Self {
            cursor,
            sticky_col: cursor.col,
            viewport,
        }
    }

    /// Move the cursor to an explicitly chosen position (edits, mode entry),
    /// updating the sticky column to match.
    pub fn place(&mut self, pos: Position) {
        self.cursor = pos;
        self.sticky_col = pos.col;
    }

    /// Re-clamp the cursor after edits that may have shortened lines. The
    /// sticky column is left alone.
    pub fn clamp_cursor(&mut self, buf: &Buffer) {
        self.cursor.clamp_to(buf);
    }

    /// Clamp the cursor then scroll the viewport to follow it.
    pub fn resync(&mut self, buf: &Buffer) -> bool {
        self.clamp_cursor(buf);
        self.viewport.sync_to_cursor(self.cursor)
    }
}

/// Session object handed to every dispatcher operation.
#[derive(Debug)]
pub struct EditorModel {
    state: EditorState,
    view: View,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        Self {
            state,
            view: View::default(),
        }
    }

    /// Constructor with a prepared view (tests, restored sessions).
    pub fn with_view(state: EditorState, mut view: View) -> Self {
        view.clamp_cursor(state.buffer());
        Self { state, view }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn view(&self) -> &View {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Disjoint mutable borrows of state and view.
    pub fn split(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, &mut self.view)
    }
}
