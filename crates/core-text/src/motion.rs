//! Cursor motion primitives.
//!
//! Pure functions over a `Buffer` + `Position` + sticky column. They never
//! touch editor state; the dispatcher decides what to do with an overshoot
//! (surface a warning) and where to store the sticky column.
//!
//! Boundary policy:
//! * Vertical motions clamp at the first / last line and report `Overshoot`.
//! * Horizontal motions cross at most one line boundary per call; a count that
//!   would carry past the boundary stops at it.

use crate::{Buffer, Position};
use std::fmt;

/// Closed set of motion directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Home => "home",
            Direction::End => "end",
            Direction::PageUp => "pageup",
            Direction::PageDown => "pagedown",
            Direction::Top => "top",
            Direction::Bottom => "bottom",
        }
    }

    /// True for motions that restore the sticky column instead of setting it.
    pub fn is_vertical(self) -> bool {
        matches!(
            self,
            Direction::Up | Direction::Down | Direction::PageUp | Direction::PageDown
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which buffer edge a clamped vertical motion ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overshoot {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionOutcome {
    pub position: Position,
    pub sticky_col: usize,
    pub overshoot: Option<Overshoot>,
}

/// Apply `direction` `repeat` times (0 is treated as 1) starting at `from`.
///
/// `page_rows` is the number of visible text rows; page motions move by half
/// of it and ignore `repeat`.
pub fn apply(
    buf: &Buffer,
    from: Position,
    sticky_col: usize,
    direction: Direction,
    repeat: usize,
    page_rows: usize,
) -> MotionOutcome {
    let repeat = repeat.max(1);
    let last_row = buf.line_count() - 1;
    let mut pos = from;
    pos.clamp_to(buf);

    if direction.is_vertical() {
        let delta = match direction {
            Direction::PageUp | Direction::PageDown => page_rows / 2,
            _ => repeat,
        };
        let mut overshoot = None;
        match direction {
            Direction::Up | Direction::PageUp => {
                if delta > pos.line {
                    pos.line = 0;
                    overshoot = Some(Overshoot::Top);
                } else {
                    pos.line -= delta;
                }
            }
            _ => {
                if pos.line + delta > last_row {
                    pos.line = last_row;
                    overshoot = Some(Overshoot::Bottom);
                } else {
                    pos.line += delta;
                }
            }
        }
        pos.col = sticky_col.min(buf.line_len(pos.line));
        return MotionOutcome {
            position: pos,
            sticky_col,
            overshoot,
        };
    }

    match direction {
        Direction::Left => {
            if pos.col == 0 {
                if pos.line > 0 {
                    pos.line -= 1;
                    pos.col = buf.line_len(pos.line);
                }
            } else {
                pos.col -= repeat.min(pos.col);
            }
        }
        Direction::Right => {
            let len = buf.line_len(pos.line);
            if pos.col >= len {
                if pos.line < last_row {
                    pos.line += 1;
                    pos.col = 0;
                }
            } else {
                pos.col += repeat.min(len - pos.col);
            }
        }
        Direction::Home => pos.col = 0,
        Direction::End => pos.col = buf.line_len(pos.line),
        Direction::Top => pos = Position::origin(),
        Direction::Bottom => {
            pos.line = last_row;
            let len = buf.line_len(last_row);
            pos.col = if len > 1 { len } else { 0 };
        }
        Direction::Up | Direction::Down | Direction::PageUp | Direction::PageDown => {
            unreachable!("vertical motion {direction} handled above")
        }
    }
    MotionOutcome {
        position: pos,
        sticky_col: pos.col,
        overshoot: None,
    }
}
