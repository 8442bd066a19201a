//! Status line composition.
//!
//! Two stages, so segments can be inspected in tests without string
//! matching:
//! 1. `compose_status` produces an ordered vector of `StatusSegment` items.
//! 2. `format_status` renders them into exactly `width` display columns:
//!    left-aligned segments, right-aligned 1-based `row:col`.
//!
//! Layout: ` NORMAL  name [+]  3 lines [copy]          12:4`
//!
//! Widths are measured with `unicode-width`, so CJK file names and the `…`
//! truncation marker are accounted for.

use core_model::EditorModel;
use core_state::{MessageLog, Mode, Severity};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NO_NAME: &str = "[No Name]";
pub const ELLIPSIS: char = '…';

/// Everything needed to render a status line.
#[derive(Debug, Clone)]
pub struct StatusContext<'a> {
    pub mode: Mode,
    /// 0-based cursor line.
    pub line: usize,
    /// 0-based cursor column (characters).
    pub col: usize,
    pub file_name: Option<&'a Path>,
    pub modified: bool,
    pub line_count: usize,
    /// Scratch register holds a line.
    pub copy_available: bool,
    pub undo_available: bool,
    /// Longest file name (in chars) before truncation.
    pub name_max: usize,
}

impl<'a> StatusContext<'a> {
    pub fn from_model(model: &'a EditorModel, name_max: usize) -> Self {
        let state = model.state();
        let cursor = model.view().cursor;
        Self {
            mode: state.mode,
            line: cursor.line,
            col: cursor.col,
            file_name: state.file_name.as_deref(),
            modified: state.modified,
            line_count: state.buffer().line_count(),
            copy_available: !state.register.is_empty(),
            undo_available: state.undo_available(),
            name_max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Mode(&'static str),
    FileName(Cow<'a, str>),
    Modified,
    LineCount(usize),
    /// Bracketed capability flag such as `copy` or `undo`.
    Indicator(&'static str),
    Position { line_1: usize, col_1: usize },
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let name: Cow<'a, str> = match ctx.file_name {
        Some(p) => {
            let shown = p.file_name().unwrap_or(p.as_os_str()).to_string_lossy();
            match shown {
                Cow::Borrowed(s) => truncate_name(s, ctx.name_max),
                Cow::Owned(s) => Cow::Owned(truncate_name(&s, ctx.name_max).into_owned()),
            }
        }
        None => Cow::Borrowed(NO_NAME),
    };

    let mut out = Vec::with_capacity(7);
    out.push(StatusSegment::Mode(ctx.mode.label()));
    out.push(StatusSegment::FileName(name));
    if ctx.modified {
        out.push(StatusSegment::Modified);
    }
    out.push(StatusSegment::LineCount(ctx.line_count));
    if ctx.copy_available {
        out.push(StatusSegment::Indicator("copy"));
    }
    if ctx.undo_available {
        out.push(StatusSegment::Indicator("undo"));
    }
    out.push(StatusSegment::Position {
        line_1: ctx.line + 1,
        col_1: ctx.col + 1,
    });
    out
}

/// Render segments into a string exactly `width` display columns wide. When
/// space runs out the left side is cut first.
pub fn format_status(segments: &[StatusSegment<'_>], width: usize) -> String {
    let mut left = String::with_capacity(width);
    let mut right = String::new();
    for seg in segments {
        match seg {
            StatusSegment::Mode(m) => {
                let _ = write!(left, " {m} ");
            }
            StatusSegment::FileName(name) => {
                left.push(' ');
                left.push_str(name);
            }
            StatusSegment::Modified => left.push_str(" [+]"),
            StatusSegment::LineCount(n) => {
                let noun = if *n == 1 { "line" } else { "lines" };
                let _ = write!(left, "  {n} {noun}");
            }
            StatusSegment::Indicator(flag) => {
                let _ = write!(left, " [{flag}]");
            }
            StatusSegment::Position { line_1, col_1 } => {
                right = position_label(*line_1, *col_1);
            }
        }
    }

    let right = truncate_to_width(&right, width);
    let right_w = right.width();
    let left = truncate_to_width(&left, width - right_w);
    let pad = width - right_w - left.width();
    let mut s = String::with_capacity(width);
    s.push_str(&left);
    s.extend(std::iter::repeat_n(' ', pad));
    s.push_str(&right);
    s
}

pub fn build_status(ctx: &StatusContext<'_>, width: usize) -> String {
    format_status(&compose_status(ctx), width)
}

/// `row:col` label as shown at the right edge (1-based inputs).
pub fn position_label(line_1: usize, col_1: usize) -> String {
    format!("{line_1}:{col_1}")
}

/// Cut `name` to `max` chars, replacing the last kept char with `…`.
pub fn truncate_name(name: &str, max: usize) -> Cow<'_, str> {
    if name.chars().count() <= max {
        return Cow::Borrowed(name);
    }
    let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

/// Longest prefix of `s` whose display width fits in `max` columns.
pub(crate) fn truncate_to_width(s: &str, max: usize) -> Cow<'_, str> {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            return Cow::Borrowed(&s[..i]);
        }
        used += w;
    }
    Cow::Borrowed(s)
}

/// The message surfaced on the status row: the newest log entry only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub text: String,
    pub severity: Severity,
}

pub fn message_overlay(log: &MessageLog) -> Option<Overlay> {
    log.last().map(|m| Overlay {
        text: m.text.clone(),
        severity: m.severity,
    })
}
