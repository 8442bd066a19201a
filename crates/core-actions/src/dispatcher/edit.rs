//! Text mutations: Insert-mode typing plus the Normal-mode line / register
//! commands. Every path that changes the buffer goes through
//! `EditorState::edit_buffer`, which marks the session modified.

use super::DispatchResult;
use crate::EditKind;
use core_config::Config;
use core_model::View;
use core_state::EditorState;
use core_text::Position;
use tracing::trace;

pub(crate) const NOTHING_TO_PASTE: &str = "nothing to paste";

pub(crate) fn handle_edit(
    kind: EditKind,
    state: &mut EditorState,
    view: &mut View,
    config: &Config,
) -> DispatchResult {
    let Position { line, col } = view.cursor;
    trace!(target: "actions.dispatch", ?kind, line, col, "edit");
    match kind {
        EditKind::InsertChar(c) => {
            state.edit_buffer().insert_char(line, col, c);
            view.place(Position::new(line, col + 1));
        }
        EditKind::InsertTab => {
            let n = config.tab_spaces();
            state.edit_buffer().insert_str(line, col, &" ".repeat(n));
            view.place(Position::new(line, col + n));
        }
        EditKind::Backspace => {
            if line == 0 && col == 0 {
                return DispatchResult::clean();
            }
            if let Some(pos) = state.edit_buffer().delete_backward(line, col) {
                view.place(pos);
            }
        }
        EditKind::Newline => {
            let pos = state.edit_buffer().split_at(line, col);
            view.place(pos);
        }
        EditKind::DeleteUnder => {
            if col >= state.buffer().line_len(line) {
                return DispatchResult::clean();
            }
            state.edit_buffer().delete_char(line, col);
        }
        EditKind::DeleteLine => {
            let removed = state.edit_buffer().remove_line(line);
            state.register.store(removed);
            let row = line.min(state.buffer().line_count() - 1);
            view.place(Position::new(row, col.min(state.buffer().line_len(row))));
        }
        EditKind::YankLine => {
            let text = state.buffer().line_text(line);
            state.register.store(text);
            state.messages.log("1 line yanked");
        }
        EditKind::PasteBelow | EditKind::PasteAbove => {
            let Some(text) = state.register.get().map(str::to_owned) else {
                state.messages.warn(NOTHING_TO_PASTE);
                return DispatchResult::dirty();
            };
            let row = if kind == EditKind::PasteBelow {
                line + 1
            } else {
                line
            };
            state.edit_buffer().insert_line(row, &text);
            view.place(Position::new(row, 0));
        }
    }
    DispatchResult::dirty()
}
