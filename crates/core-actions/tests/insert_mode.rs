mod common;

use common::*;
use core_config::Config;
use core_events::KeyCode;
use core_state::Mode;
use pretty_assertions::assert_eq;

#[test]
fn insert_then_escape() {
    let mut m = model_with(&[""]);
    let mut strokes = chars("ihi");
    strokes.push(Stroke::Key(KeyCode::Esc));
    replay(&mut m, &strokes);
    assert_eq!(lines(&m), vec!["hi"]);
    assert_eq!(cursor(&m), (0, 2));
    assert_eq!(m.state().mode, Mode::Normal);
    assert!(m.state().modified);
}

#[test]
fn quit_modifier_leaves_insert() {
    let mut m = model_with(&["x"]);
    replay(&mut m, &[Stroke::Char('a'), Stroke::Ctrl('q')]);
    assert_eq!(m.state().mode, Mode::Normal);
}

#[test]
fn mode_entry_positions() {
    let mut m = model_with(&["abcd"]);
    replay(&mut m, &chars("ll"));
    replay(&mut m, &[Stroke::Char('i'), Stroke::Key(KeyCode::Esc)]);
    assert_eq!(cursor(&m), (0, 1));
    replay(&mut m, &[Stroke::Char('a'), Stroke::Key(KeyCode::Esc)]);
    assert_eq!(cursor(&m), (0, 2));
    replay(&mut m, &[Stroke::Char('A'), Stroke::Key(KeyCode::Esc)]);
    assert_eq!(cursor(&m), (0, 4));
    replay(&mut m, &[Stroke::Char('a'), Stroke::Key(KeyCode::Esc)]);
    assert_eq!(cursor(&m), (0, 4), "append at line end stays");
    replay(&mut m, &[Stroke::Char('I'), Stroke::Key(KeyCode::Esc)]);
    assert_eq!(cursor(&m), (0, 0));
    replay(&mut m, &[Stroke::Char('i'), Stroke::Key(KeyCode::Esc)]);
    assert_eq!(cursor(&m), (0, 0), "insert at col 0 stays");
    assert!(!m.state().modified);
}

#[test]
fn open_line_below_and_above() {
    let mut m = model_with(&["one", "two"]);
    let mut strokes = chars("oX");
    strokes.push(Stroke::Key(KeyCode::Esc));
    strokes.extend(chars("gg"));
    strokes.extend(chars("OY"));
    strokes.push(Stroke::Key(KeyCode::Esc));
    replay(&mut m, &strokes);
    assert_eq!(lines(&m), vec!["Y", "one", "X", "two"]);
    assert_eq!(cursor(&m), (0, 1));
}

#[test]
fn enter_splits_and_backspace_joins() {
    let mut m = model_with(&["hello"]);
    let mut strokes = chars("lll");
    strokes.push(Stroke::Char('i'));
    strokes.push(Stroke::Key(KeyCode::Enter));
    replay(&mut m, &strokes);
    assert_eq!(lines(&m), vec!["he", "llo"]);
    assert_eq!(cursor(&m), (1, 0));
    replay(&mut m, &[Stroke::Key(KeyCode::Backspace)]);
    assert_eq!(lines(&m), vec!["hello"]);
    assert_eq!(cursor(&m), (0, 2));
    replay(&mut m, &[Stroke::Key(KeyCode::Backspace); 3]);
    assert_eq!(lines(&m), vec!["llo"]);
    assert_eq!(cursor(&m), (0, 0));
}

#[test]
fn backspace_at_buffer_start_is_noop() {
    let mut m = model_with(&["abc"]);
    replay(&mut m, &[Stroke::Char('I'), Stroke::Key(KeyCode::Backspace)]);
    assert_eq!(lines(&m), vec!["abc"]);
    assert_eq!(cursor(&m), (0, 0));
    assert!(!m.state().modified);
}

#[test]
fn tab_inserts_configured_spaces() {
    let mut m = model_with(&[""]);
    replay(&mut m, &[Stroke::Char('i'), Stroke::Key(KeyCode::Tab)]);
    assert_eq!(lines(&m), vec!["  "]);

    let mut cfg = Config::default();
    cfg.file.editor.tab_spaces = 4;
    let mut m = model_with(&[""]);
    replay_with_config(&mut m, &[Stroke::Char('i'), Stroke::Key(KeyCode::Tab)], &cfg);
    assert_eq!(lines(&m), vec!["    "]);
    assert_eq!(cursor(&m), (0, 4));
}

#[test]
fn digits_and_space_are_text_in_insert_mode() {
    let mut m = model_with(&[""]);
    replay(&mut m, &chars("i1 2"));
    assert_eq!(lines(&m), vec!["1 2"]);
    assert!(m.state().pending_count.is_empty());
}

#[test]
fn arrows_move_in_insert_mode() {
    let mut m = model_with(&["ab", "cd"]);
    replay(
        &mut m,
        &[
            Stroke::Char('i'),
            Stroke::Key(KeyCode::Down),
            Stroke::Key(KeyCode::End),
            Stroke::Char('!'),
        ],
    );
    assert_eq!(lines(&m), vec!["ab", "cd!"]);
    assert_eq!(m.state().mode, Mode::Insert);
}
