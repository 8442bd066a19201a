//! KeyEvent -> Action translation.
//!
//! Normal mode owns the numeric prefix: digits accumulate into
//! `EditorState::pending_count`, a motion consumes it, every other key clears
//! it. Two-key sequences (`gg`, `!Q`, `!w`, `dd`) pull their second key
//! straight from the `KeySource`; an unexpected second key cancels the
//! sequence.

use crate::{Action, EditKind, ModeChange};
use core_events::{KeyCode, KeyEvent, KeySource};
use core_state::{EditorState, Mode};
use core_text::Direction;
use tracing::trace;

/// Returns `Ok(None)` for keys that only update translator state or are
/// ignored.
pub fn translate_key(
    state: &mut EditorState,
    key: &KeyEvent,
    keys: &mut dyn KeySource,
) -> anyhow::Result<Option<Action>> {
    let action = match state.mode {
        Mode::Insert => translate_insert(key),
        Mode::Normal => translate_normal(state, key, keys)?,
    };
    trace!(target: "actions.translate", key = %key, mode = ?state.mode, ?action, "translated");
    Ok(action)
}

/// Keys shared by both modes.
fn navigation_key(code: KeyCode) -> Option<Direction> {
    Some(match code {
        KeyCode::Up => Direction::Up,
        KeyCode::Down => Direction::Down,
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        KeyCode::Home => Direction::Home,
        KeyCode::End => Direction::End,
        KeyCode::PageUp => Direction::PageUp,
        KeyCode::PageDown => Direction::PageDown,
        _ => return None,
    })
}

fn translate_insert(key: &KeyEvent) -> Option<Action> {
    if key.is_quit_modifier() {
        return Some(Action::ModeChange(ModeChange::LeaveInsert));
    }
    if let Some(direction) = navigation_key(key.code) {
        return Some(Action::Motion {
            direction,
            count: 1,
        });
    }
    match key.code {
        KeyCode::Esc => Some(Action::ModeChange(ModeChange::LeaveInsert)),
        KeyCode::Enter => Some(Action::Edit(EditKind::Newline)),
        KeyCode::Backspace => Some(Action::Edit(EditKind::Backspace)),
        KeyCode::Tab => Some(Action::Edit(EditKind::InsertTab)),
        _ => key.printable().map(|c| Action::Edit(EditKind::InsertChar(c))),
    }
}

fn translate_normal(
    state: &mut EditorState,
    key: &KeyEvent,
    keys: &mut dyn KeySource,
) -> anyhow::Result<Option<Action>> {
    if let Some(direction) = navigation_key(key.code) {
        return Ok(Some(motion(state, direction)));
    }
    let Some(c) = key.printable() else {
        state.pending_count.clear();
        return Ok(None);
    };
    if c.is_ascii_digit() {
        state.pending_count.push_digit(c);
        return Ok(None);
    }
    let direction = match c {
        'h' => Some(Direction::Left),
        'j' => Some(Direction::Down),
        'k' => Some(Direction::Up),
        'l' => Some(Direction::Right),
        '^' => Some(Direction::Home),
        '$' => Some(Direction::End),
        'G' => Some(Direction::Bottom),
        'g' => second_key_is(keys, 'g')?.then_some(Direction::Top),
        _ => None,
    };
    if let Some(direction) = direction {
        return Ok(Some(motion(state, direction)));
    }

    state.pending_count.clear();
    let action = match c {
        'i' => Some(Action::ModeChange(ModeChange::InsertBefore)),
        'a' => Some(Action::ModeChange(ModeChange::Append)),
        'I' => Some(Action::ModeChange(ModeChange::InsertLineStart)),
        'A' => Some(Action::ModeChange(ModeChange::AppendLineEnd)),
        'o' => Some(Action::ModeChange(ModeChange::OpenBelow)),
        'O' => Some(Action::ModeChange(ModeChange::OpenAbove)),
        'x' => Some(Action::Edit(EditKind::DeleteUnder)),
        'y' => Some(Action::Edit(EditKind::YankLine)),
        'p' => Some(Action::Edit(EditKind::PasteBelow)),
        'P' => Some(Action::Edit(EditKind::PasteAbove)),
        'd' => second_key_is(keys, 'd')?.then_some(Action::Edit(EditKind::DeleteLine)),
        '!' => forced_command(keys)?,
        'Q' => Some(Action::Quit { force: false }),
        'w' => Some(Action::Save { force: false }),
        _ => None,
    };
    Ok(action)
}

fn motion(state: &mut EditorState, direction: Direction) -> Action {
    Action::Motion {
        direction,
        count: state.pending_count.take(),
    }
}

/// Second key of a `!` sequence.
fn forced_command(keys: &mut dyn KeySource) -> anyhow::Result<Option<Action>> {
    let next = keys.read_key()?;
    let action = match next.printable() {
        Some('Q') => Some(Action::Quit { force: true }),
        Some('w') => Some(Action::Save { force: true }),
        _ => {
            trace!(target: "actions.translate", key = %next, "sequence_cancelled");
            None
        }
    };
    Ok(action)
}

fn second_key_is(keys: &mut dyn KeySource, expected: char) -> anyhow::Result<bool> {
    let next = keys.read_key()?;
    let matched = next.printable() == Some(expected);
    if !matched {
        trace!(target: "actions.translate", key = %next, expected = %expected, "sequence_cancelled");
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::ScriptedKeySource;
    use core_text::Buffer;

    fn state() -> EditorState {
        EditorState::new(Buffer::from_text("abc"))
    }

    fn translate(st: &mut EditorState, key: KeyEvent) -> Option<Action> {
        let mut keys = ScriptedKeySource::default();
        translate_key(st, &key, &mut keys).unwrap()
    }

    #[test]
    fn digits_accumulate_then_motion_consumes() {
        let mut st = state();
        assert_eq!(translate(&mut st, KeyEvent::char('1')), None);
        assert_eq!(translate(&mut st, KeyEvent::char('2')), None);
        assert_eq!(st.pending_count.as_str(), "12");
        assert_eq!(
            translate(&mut st, KeyEvent::char('j')),
            Some(Action::Motion {
                direction: Direction::Down,
                count: 12
            })
        );
        assert!(st.pending_count.is_empty());
    }

    #[test]
    fn non_motion_key_clears_count() {
        let mut st = state();
        translate(&mut st, KeyEvent::char('5'));
        assert_eq!(translate(&mut st, KeyEvent::char('z')), None);
        assert!(st.pending_count.is_empty());
        translate(&mut st, KeyEvent::char('5'));
        translate(&mut st, KeyEvent::new(KeyCode::Esc));
        assert!(st.pending_count.is_empty());
    }

    #[test]
    fn arrows_consume_count_in_normal_mode() {
        let mut st = state();
        translate(&mut st, KeyEvent::char('3'));
        assert_eq!(
            translate(&mut st, KeyEvent::new(KeyCode::Right)),
            Some(Action::Motion {
                direction: Direction::Right,
                count: 3
            })
        );
    }

    #[test]
    fn two_key_sequences_read_nested_key() {
        let mut st = state();
        let mut keys = ScriptedKeySource::from_chars("g");
        let a = translate_key(&mut st, &KeyEvent::char('g'), &mut keys).unwrap();
        assert_eq!(
            a,
            Some(Action::Motion {
                direction: Direction::Top,
                count: 1
            })
        );
        assert_eq!(keys.remaining(), 0);

        let mut keys = ScriptedKeySource::from_chars("Q");
        let a = translate_key(&mut st, &KeyEvent::char('!'), &mut keys).unwrap();
        assert_eq!(a, Some(Action::Quit { force: true }));

        let mut keys = ScriptedKeySource::from_chars("w");
        let a = translate_key(&mut st, &KeyEvent::char('!'), &mut keys).unwrap();
        assert_eq!(a, Some(Action::Save { force: true }));

        let mut keys = ScriptedKeySource::from_chars("d");
        let a = translate_key(&mut st, &KeyEvent::char('d'), &mut keys).unwrap();
        assert_eq!(a, Some(Action::Edit(EditKind::DeleteLine)));
    }

    #[test]
    fn wrong_second_key_cancels_sequence() {
        let mut st = state();
        let mut keys = ScriptedKeySource::from_chars("xq");
        assert_eq!(
            translate_key(&mut st, &KeyEvent::char('g'), &mut keys).unwrap(),
            None
        );
        assert_eq!(
            translate_key(&mut st, &KeyEvent::char('!'), &mut keys).unwrap(),
            None
        );
        assert_eq!(keys.remaining(), 0);
    }

    #[test]
    fn nested_read_failure_propagates() {
        let mut st = state();
        let mut keys = ScriptedKeySource::default();
        assert!(translate_key(&mut st, &KeyEvent::char('d'), &mut keys).is_err());
    }

    #[test]
    fn insert_mode_keys() {
        let mut st = state();
        st.mode = Mode::Insert;
        assert_eq!(
            translate(&mut st, KeyEvent::char('5')),
            Some(Action::Edit(EditKind::InsertChar('5')))
        );
        assert_eq!(
            translate(&mut st, KeyEvent::char(' ')),
            Some(Action::Edit(EditKind::InsertChar(' ')))
        );
        assert_eq!(
            translate(&mut st, KeyEvent::new(KeyCode::Tab)),
            Some(Action::Edit(EditKind::InsertTab))
        );
        assert_eq!(
            translate(&mut st, KeyEvent::ctrl('q')),
            Some(Action::ModeChange(ModeChange::LeaveInsert))
        );
        assert_eq!(translate(&mut st, KeyEvent::ctrl('x')), None);
        assert!(st.pending_count.is_empty());
    }

    #[test]
    fn quit_modifier_ignored_in_normal_mode() {
        let mut st = state();
        assert_eq!(translate(&mut st, KeyEvent::ctrl('q')), None);
    }
}
