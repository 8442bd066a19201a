//! Motion handling: applies the pure motion primitive and surfaces
//! overshoot as a Warn message.

use super::DispatchResult;
use core_model::View;
use core_state::EditorState;
use core_text::{Direction, Overshoot, motion};
use tracing::trace;

pub(crate) const TOP_OVERSHOOT: &str = "top of buffer is not that far";
pub(crate) const BOTTOM_OVERSHOOT: &str = "bottom of buffer is not that far";

pub(crate) fn handle_motion(
    direction: Direction,
    count: usize,
    state: &mut EditorState,
    view: &mut View,
) -> DispatchResult {
    let before = view.cursor;
    let outcome = motion::apply(
        state.buffer(),
        view.cursor,
        view.sticky_col,
        direction,
        count,
        view.viewport.visible_rows,
    );
    view.cursor = outcome.position;
    view.sticky_col = outcome.sticky_col;
    match outcome.overshoot {
        Some(Overshoot::Top) => state.messages.warn(TOP_OVERSHOOT),
        Some(Overshoot::Bottom) => state.messages.warn(BOTTOM_OVERSHOOT),
        None => {}
    }
    trace!(
        target: "actions.dispatch",
        %direction,
        count,
        from = ?before,
        to = ?view.cursor,
        overshoot = ?outcome.overshoot,
        "motion"
    );
    if outcome.overshoot.is_some() || before != view.cursor {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
