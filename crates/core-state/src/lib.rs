//! Editor session state: buffer, mode, pending count, scratch register,
//! message log and file metadata.
//!
//! Cursor and viewport live in `core-model::View`; this crate stays
//! buffer-centric so the dispatcher can split-borrow state and view.
//!
//! Message log:
//! * Bounded FIFO of severity-tagged entries; only the newest is surfaced by
//!   the status presenter, but history is retained until cleared.
//! * Cleared on successful save and on forced quit.

use core_text::Buffer;
use std::collections::VecDeque;
use std::path::PathBuf;

/// Default message log capacity when no configuration overrides it.
pub const MESSAGE_LOG_DEFAULT_CAPACITY: usize = 64;

/// Largest repeat count accepted from a numeric prefix.
pub const PENDING_COUNT_MAX: usize = 999_999;

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Command / navigation mode.
    #[default]
    Normal,
    /// Text entry mode.
    Insert,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
        }
    }
}

/// Accumulated decimal digits typed before a motion (e.g. `12j`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PendingCount {
    digits: String,
}

impl PendingCount {
    pub fn push_digit(&mut self, d: char) {
        debug_assert!(d.is_ascii_digit());
        self.digits.push(d);
    }
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
    pub fn as_str(&self) -> &str {
        &self.digits
    }
    pub fn clear(&mut self) {
        self.digits.clear();
    }
    /// Consume the count. Absent or zero yields 1; values past
    /// `PENDING_COUNT_MAX` saturate.
    pub fn take(&mut self) -> usize {
        let digits = std::mem::take(&mut self.digits);
        if digits.is_empty() {
            return 1;
        }
        let parsed = digits
            .parse::<usize>()
            .unwrap_or(PENDING_COUNT_MAX)
            .min(PENDING_COUNT_MAX);
        parsed.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Log,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub text: String,
}

/// Bounded ordered log of user-facing messages.
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: VecDeque<Message>,
    capacity: usize,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::with_capacity(MESSAGE_LOG_DEFAULT_CAPACITY)
    }
}

impl MessageLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push<S: Into<String>>(&mut self, severity: Severity, text: S) {
        let text = text.into();
        tracing::debug!(target: "state.messages", ?severity, text = text.as_str(), "message");
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(Message { severity, text });
    }

    pub fn log<S: Into<String>>(&mut self, text: S) {
        self.push(Severity::Log, text);
    }
    pub fn warn<S: Into<String>>(&mut self, text: S) {
        self.push(Severity::Warn, text);
    }
    pub fn error<S: Into<String>>(&mut self, text: S) {
        self.push(Severity::Error, text);
    }

    /// Most recent entry (the only one ever displayed).
    pub fn last(&self) -> Option<&Message> {
        self.entries.back()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    /// Change the bound, dropping the oldest entries that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Single-slot scratch register holding one yanked / deleted line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Register {
    content: Option<String>,
}

impl Register {
    pub fn store<S: Into<String>>(&mut self, line: S) {
        self.content = Some(line.into());
    }
    pub fn get(&self) -> Option<&str> {
        self.content.as_deref()
    }
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }
    pub fn clear(&mut self) {
        self.content = None;
    }
}

/// Line ending style detected from a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// Short name for messages.
    pub fn label(self) -> &'static str {
        match self {
            LineEnding::Lf => "LF",
            LineEnding::Cr => "CR",
            LineEnding::Crlf => "CRLF",
        }
    }
}

/// Result of normalizing line endings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// LF-only content.
    pub normalized: String,
    /// Majority style (ties: CRLF > LF > CR). LF when no separator was seen.
    pub original: LineEnding,
    /// More than one style was present.
    pub mixed: bool,
}

/// Rewrite CRLF and lone CR to LF, recording the dominant original style.
pub fn normalize_line_endings(input: &str) -> NormalizedText {
    let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                crlf += 1;
                out.push('\n');
            }
            '\r' => {
                cr += 1;
                out.push('\n');
            }
            '\n' => {
                lf += 1;
                out.push('\n');
            }
            other => out.push(other),
        }
    }
    let mut original = LineEnding::Lf;
    let mut max = 0usize;
    for (style, count) in [
        (LineEnding::Crlf, crlf),
        (LineEnding::Lf, lf),
        (LineEnding::Cr, cr),
    ] {
        if count > max {
            max = count;
            original = style;
        }
    }
    let mixed = [crlf, lf, cr].iter().filter(|c| **c > 0).count() > 1;
    NormalizedText {
        normalized: out,
        original,
        mixed,
    }
}

/// Top-level session state (single buffer).
#[derive(Debug)]
pub struct EditorState {
    buffer: Buffer,
    pub mode: Mode,
    /// Save target; `None` for an untitled session.
    pub file_name: Option<PathBuf>,
    pub modified: bool,
    pub pending_count: PendingCount,
    pub register: Register,
    pub messages: MessageLog,
    pub line_ending: LineEnding,
    pub mixed_line_endings: bool,
    /// The file held bytes that are not valid UTF-8; they were decoded as
    /// U+FFFD. A plain write is refused while this is set.
    pub lossy_encoding: bool,
}

impl EditorState {
    pub fn new(buffer: Buffer) -> Self {
        Self {
            buffer,
            mode: Mode::Normal,
            file_name: None,
            modified: false,
            pending_count: PendingCount::default(),
            register: Register::default(),
            messages: MessageLog::default(),
            line_ending: LineEnding::Lf,
            mixed_line_endings: false,
            lossy_encoding: false,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Mutable buffer access for edits. Marks the session modified; every
    /// text mutation must go through here.
    pub fn edit_buffer(&mut self) -> &mut Buffer {
        self.modified = true;
        &mut self.buffer
    }

    /// Replace the buffer wholesale (load path). Does not touch `modified`.
    pub fn replace_buffer(&mut self, buffer: Buffer) {
        self.buffer = buffer;
    }

    /// Undo history is not implemented; the status indicator stays off.
    pub fn undo_available(&self) -> bool {
        false
    }
}
