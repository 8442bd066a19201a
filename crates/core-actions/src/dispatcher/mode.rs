//! Normal <-> Insert transitions and their cursor placement.

use super::DispatchResult;
use crate::ModeChange;
use core_model::View;
use core_state::{EditorState, Mode};
use core_text::Position;

pub(crate) fn handle_mode_change(
    change: ModeChange,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    let Position { line, col } = view.cursor;
    let len = state.buffer().line_len(line);
    let target = match change {
        ModeChange::LeaveInsert => {
            state.mode = Mode::Normal;
            return DispatchResult::dirty();
        }
        ModeChange::InsertBefore => Position::new(line, col.saturating_sub(1)),
        ModeChange::Append => Position::new(line, (col + 1).min(len)),
        ModeChange::InsertLineStart => Position::new(line, 0),
        ModeChange::AppendLineEnd => Position::new(line, len),
        ModeChange::OpenBelow => {
            state.edit_buffer().insert_blank_line(line, false);
            Position::new(line + 1, 0)
        }
        ModeChange::OpenAbove => {
            state.edit_buffer().insert_blank_line(line, true);
            Position::new(line, 0)
        }
    };
    view.place(target);
    state.mode = Mode::Insert;
    DispatchResult::dirty()
}
