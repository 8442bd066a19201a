//! Key translation and action dispatch.
//!
//! One key in, one `DispatchResult` out. `handle_key` runs the translator
//! (which may perform a nested blocking read for two-key sequences), then the
//! dispatcher, then re-establishes the cursor / viewport invariants:
//!
//! * the cursor column never exceeds the current line length;
//! * the viewport contains the cursor.

use core_config::Config;
use core_events::{KeyEvent, KeySource};
use core_model::EditorModel;
use core_text::Direction;

pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use io_ops::{IoError, Loaded, load, read_file, save, save_as, save_replacing_invalid};
pub use key_translator::translate_key;

/// Normal <-> Insert transitions. Every variant except `LeaveInsert` enters
/// Insert mode after positioning the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// `i`: one column left of the cursor (unless at col 0).
    InsertBefore,
    /// `a`: one column right of the cursor (unless at line end).
    Append,
    /// `I`
    InsertLineStart,
    /// `A`
    AppendLineEnd,
    /// `o`
    OpenBelow,
    /// `O`
    OpenAbove,
    LeaveInsert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    InsertTab,
    Backspace,
    Newline,
    /// `x`
    DeleteUnder,
    /// `dd`
    DeleteLine,
    /// `y`
    YankLine,
    /// `p`
    PasteBelow,
    /// `P`
    PasteAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion { direction: Direction, count: usize },
    ModeChange(ModeChange),
    Edit(EditKind),
    /// `w`; `!w` also writes a file that was not valid UTF-8.
    Save { force: bool },
    Quit { force: bool },
}

impl Action {
    /// Mode entry places the cursor itself; no post-dispatch column clamp.
    pub fn is_mode_entry(&self) -> bool {
        matches!(self, Action::ModeChange(m) if *m != ModeChange::LeaveInsert)
    }
}

/// Translate and dispatch a single key.
///
/// Errors only when the key source fails during a nested read.
pub fn handle_key(
    model: &mut EditorModel,
    key: KeyEvent,
    keys: &mut dyn KeySource,
    config: &Config,
) -> anyhow::Result<DispatchResult> {
    let action = translate_key(model.state_mut(), &key, keys)?;
    let mode_entry = action.as_ref().is_some_and(Action::is_mode_entry);
    let result = match action {
        Some(action) => dispatch(action, model, config),
        None => DispatchResult::clean(),
    };
    let (state, view) = model.split();
    if !mode_entry {
        view.clamp_cursor(state.buffer());
    }
    view.viewport.sync_to_cursor(view.cursor);
    Ok(result)
}
