//! Session commands: write (`w`, `!w`) and quit (`Q`, `!Q`).

use super::DispatchResult;
use crate::io_ops;
use core_state::EditorState;
use tracing::info;

pub(crate) const UNSAVED_CHANGES: &str = "unsaved changes: press w to write or !Q to force quit";

pub(crate) fn handle_save(force: bool, state: &mut EditorState) -> DispatchResult {
    let saved = if force {
        io_ops::save_replacing_invalid(state)
    } else {
        io_ops::save(state)
    };
    match saved {
        Ok(lines) => {
            info!(target: "actions.dispatch", lines, "save_ok");
        }
        Err(e) => {
            state.messages.error(format!("write failed: {e}"));
        }
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_quit(force: bool, state: &mut EditorState) -> DispatchResult {
    if force {
        info!(target: "actions.dispatch", modified = state.modified, "force_quit");
        state.messages.clear();
        state.modified = false;
        return DispatchResult::quit();
    }
    if state.modified {
        state.messages.warn(UNSAVED_CHANGES);
        return DispatchResult::dirty();
    }
    info!(target: "actions.dispatch", "quit");
    DispatchResult::quit()
}
