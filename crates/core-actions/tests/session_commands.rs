mod common;

use common::*;
use core_actions::load;
use core_events::KeyCode;
use core_state::{EditorState, Severity};
use core_text::Buffer;
use pretty_assertions::assert_eq;
use std::fs;

#[test]
fn quit_when_unmodified() {
    let mut m = model_with(&["abc"]);
    let r = replay(&mut m, &chars("Q"));
    assert!(r.quit);
}

#[test]
fn quit_with_unsaved_changes_warns() {
    let mut m = model_with(&["abc"]);
    let r = replay(&mut m, &chars("xQ"));
    assert!(!r.quit);
    assert_eq!(
        last_message(&m),
        Some((
            Severity::Warn,
            "unsaved changes: press w to write or !Q to force quit".into()
        ))
    );
}

#[test]
fn force_quit_discards_changes_and_messages() {
    let mut m = model_with(&["abc"]);
    let r = replay(&mut m, &chars("xQ!Q"));
    assert!(r.quit);
    assert!(m.state().messages.is_empty());
    assert!(!m.state().modified);
}

#[test]
fn bang_without_q_does_nothing() {
    let mut m = model_with(&["abc"]);
    let r = replay(&mut m, &chars("!x"));
    assert!(!r.quit);
    assert_eq!(lines(&m), vec!["abc"], "second key is consumed, not executed");
}

#[test]
fn write_saves_and_clears_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.txt");
    let mut m = model_from_state(load(&path));
    let mut strokes = chars("ihello");
    strokes.push(Stroke::Key(KeyCode::Esc));
    strokes.extend(chars("9jwQ"));
    let r = replay(&mut m, &strokes);
    assert!(r.quit, "quit succeeds after a write");
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    assert!(!m.state().modified);
}

#[test]
fn write_failure_keeps_modified() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.txt");
    let mut m = model_from_state(load(&path));
    let mut strokes = chars("ox");
    strokes.push(Stroke::Key(KeyCode::Esc));
    strokes.push(Stroke::Char('w'));
    replay(&mut m, &strokes);
    let last = m.state().messages.last().unwrap();
    assert_eq!(last.severity, Severity::Error);
    assert!(last.text.starts_with("write failed"));
    assert!(m.state().modified);
}

#[test]
fn write_untitled_reports_error() {
    let mut m = model_from_state(EditorState::new(Buffer::from_text("abc")));
    replay(&mut m, &chars("w"));
    assert_eq!(
        last_message(&m),
        Some((Severity::Error, "write failed: no file name".into()))
    );
}

#[test]
fn invalid_utf8_file_needs_bang_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    fs::write(&path, b"caf\xe9\nline2").unwrap();
    let mut m = model_from_state(load(&path));
    assert_eq!(last_message(&m).map(|(s, _)| s), Some(Severity::Warn));

    replay(&mut m, &chars("w"));
    let (severity, text) = last_message(&m).unwrap();
    assert_eq!(severity, Severity::Error);
    assert!(text.contains("!w"), "{text}");
    assert_eq!(fs::read(&path).unwrap(), b"caf\xe9\nline2");

    replay(&mut m, &chars("!w"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "caf\u{FFFD}\nline2");
    assert!(m.state().messages.is_empty());
}

#[test]
fn crlf_file_round_trips_through_edit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dos.txt");
    fs::write(&path, "one\r\ntwo\r\n").unwrap();
    let mut m = model_from_state(load(&path));
    assert_eq!(lines(&m), vec!["one", "two", ""]);
    replay(&mut m, &chars("jxw"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "one\r\nwo\r\n");
}
