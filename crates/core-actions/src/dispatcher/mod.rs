//! Action dispatcher.
//!
//! Routes each `Action` to the handler owning that concern. Handlers receive
//! disjoint borrows of `EditorState` and `View` and report whether the frame
//! needs a redraw and whether the session should end.

use crate::Action;
use core_config::Config;
use core_model::EditorModel;
use tracing::trace;

mod command;
mod edit;
mod mode;
mod motion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn quit() -> Self {
        Self {
            dirty: false,
            quit: true,
        }
    }
}

pub fn dispatch(action: Action, model: &mut EditorModel, config: &Config) -> DispatchResult {
    trace!(target: "actions.dispatch", ?action, "dispatch");
    let (state, view) = model.split();
    match action {
        Action::Motion { direction, count } => motion::handle_motion(direction, count, state, view),
        Action::ModeChange(change) => mode::handle_mode_change(change, state, view),
        Action::Edit(kind) => edit::handle_edit(kind, state, view, config),
        Action::Save { force } => command::handle_save(force, state),
        Action::Quit { force } => command::handle_quit(force, state),
    }
}
