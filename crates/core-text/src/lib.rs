//! Line store backed by a `ropey::Rope`.
//!
//! The rope content is the buffer's lines joined by `\n` with no trailing
//! separator, so `Rope::len_lines` is exactly the line count and an empty
//! rope is a single empty line. Only LF is a line break (the crate is built
//! without ropey's `cr_lines` / `unicode_lines` features); callers normalize
//! CRLF / CR before constructing a buffer.
//!
//! Columns are character indices. Tabs are stored literally; expanding them
//! is a rendering concern.
//!
//! Row / column preconditions are contract checks: violating them is a bug in
//! the caller, asserted in debug builds.

use ropey::Rope;

pub mod motion;

pub use motion::{Direction, MotionOutcome, Overshoot};

/// A position inside a buffer expressed as (line index, character column).
/// `col` may equal the line length (append position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
    pub fn origin() -> Self {
        Self { line: 0, col: 0 }
    }
    /// Clamp into the valid range of `buf` (row first, then column against that row).
    pub fn clamp_to(&mut self, buf: &Buffer) {
        let last = buf.line_count() - 1;
        if self.line > last {
            self.line = last;
        }
        let max_len = buf.line_len(self.line);
        if self.col > max_len {
            self.col = max_len;
        }
    }
}

/// Ordered sequence of lines. Never empty.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// A buffer holding exactly one empty line.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build from LF-separated text. A trailing `\n` yields a final empty line.
    pub fn from_text(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
        }
    }

    /// Build from individual lines (which must not contain `\n`).
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                joined.push('\n');
            }
            debug_assert!(!line.as_ref().contains('\n'), "line contains separator");
            joined.push_str(line.as_ref());
        }
        Self::from_text(&joined)
    }

    /// Total number of lines (always >= 1).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Character length of a line, excluding its separator.
    pub fn line_len(&self, row: usize) -> usize {
        self.check_row(row);
        let chars = self.rope.line(row).len_chars();
        if row + 1 < self.line_count() {
            chars - 1
        } else {
            chars
        }
    }

    /// Line content without its separator.
    pub fn line_text(&self, row: usize) -> String {
        self.check_row(row);
        let mut s = self.rope.line(row).to_string();
        if s.ends_with('\n') {
            s.pop();
        }
        s
    }

    /// Iterate line contents (separators stripped).
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.line_count()).map(|row| self.line_text(row))
    }

    /// Characters of a line in `[from, from + take)` (clamped to the line).
    pub fn line_chars(&self, row: usize, from: usize, take: usize) -> Vec<char> {
        self.check_row(row);
        let len = self.line_len(row);
        if from >= len {
            return Vec::new();
        }
        let start = self.line_start(row) + from;
        let end = start + take.min(len - from);
        self.rope.slice(start..end).chars().collect()
    }

    /// Whole buffer as LF-joined text (no trailing separator).
    pub fn to_text(&self) -> String {
        self.rope.to_string()
    }

    fn line_start(&self, row: usize) -> usize {
        self.rope.line_to_char(row)
    }

    fn check_row(&self, row: usize) {
        debug_assert!(
            row < self.line_count(),
            "row {row} out of range (line_count {})",
            self.line_count()
        );
    }

    fn check_col(&self, row: usize, col: usize) {
        debug_assert!(
            col <= self.line_len(row),
            "col {col} out of range for row {row} (len {})",
            self.line_len(row)
        );
    }

    /// Insert `ch` at `col` of `row`, shifting the remainder right.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) {
        debug_assert!(ch != '\n', "use split_at to break lines");
        self.check_row(row);
        self.check_col(row, col);
        let idx = self.line_start(row) + col;
        self.rope.insert_char(idx, ch);
    }

    /// Insert a run of characters (no separators) at `col` of `row`.
    pub fn insert_str(&mut self, row: usize, col: usize, text: &str) {
        debug_assert!(!text.contains('\n'), "use split_at to break lines");
        self.check_row(row);
        self.check_col(row, col);
        let idx = self.line_start(row) + col;
        self.rope.insert(idx, text);
    }

    /// Backspace semantics. Removes the character before `col`, or joins `row`
    /// onto the previous line when `col == 0`. Returns the new cursor position,
    /// or `None` at the very start of the buffer (no-op).
    pub fn delete_backward(&mut self, row: usize, col: usize) -> Option<Position> {
        self.check_row(row);
        self.check_col(row, col);
        if col > 0 {
            let idx = self.line_start(row) + col;
            self.rope.remove(idx - 1..idx);
            return Some(Position::new(row, col - 1));
        }
        if row == 0 {
            return None;
        }
        let prev_len = self.line_len(row - 1);
        let newline = self.line_start(row) - 1;
        self.rope.remove(newline..newline + 1);
        Some(Position::new(row - 1, prev_len))
    }

    /// Remove the character under `col`. No-op (returns `None`) at line end.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Option<char> {
        self.check_row(row);
        if col >= self.line_len(row) {
            return None;
        }
        let idx = self.line_start(row) + col;
        let removed = self.rope.char(idx);
        self.rope.remove(idx..idx + 1);
        Some(removed)
    }

    /// Split `row` at `col`; the right half becomes `row + 1`. Returns `(row + 1, 0)`.
    pub fn split_at(&mut self, row: usize, col: usize) -> Position {
        self.check_row(row);
        self.check_col(row, col);
        let idx = self.line_start(row) + col;
        self.rope.insert_char(idx, '\n');
        Position::new(row + 1, 0)
    }

    /// Insert an empty line at `row` (`before`) or at `row + 1`.
    pub fn insert_blank_line(&mut self, row: usize, before: bool) {
        self.check_row(row);
        let idx = if before {
            self.line_start(row)
        } else {
            self.line_start(row) + self.line_len(row)
        };
        self.rope.insert_char(idx, '\n');
    }

    /// Insert `text` as a new line at index `row` (`row == line_count` appends).
    pub fn insert_line(&mut self, row: usize, text: &str) {
        debug_assert!(row <= self.line_count(), "row {row} past end");
        debug_assert!(!text.contains('\n'), "line contains separator");
        if row < self.line_count() {
            let idx = self.line_start(row);
            self.rope.insert(idx, &format!("{text}\n"));
        } else {
            let idx = self.rope.len_chars();
            self.rope.insert(idx, &format!("\n{text}"));
        }
    }

    /// Remove line `row` and return its content. Removing the only line leaves
    /// a single empty line behind.
    pub fn remove_line(&mut self, row: usize) -> String {
        self.check_row(row);
        let text = self.line_text(row);
        let count = self.line_count();
        if count == 1 {
            self.rope = Rope::new();
        } else if row + 1 < count {
            let start = self.line_start(row);
            let end = self.line_start(row + 1);
            self.rope.remove(start..end);
        } else {
            let start = self.line_start(row) - 1;
            let end = self.rope.len_chars();
            self.rope.remove(start..end);
        }
        text
    }
}
