mod common;

use common::*;
use core_state::Severity;
use pretty_assertions::assert_eq;

#[test]
fn yank_and_paste_below() {
    let mut m = model_with(&["first", "second"]);
    replay(&mut m, &chars("yp"));
    assert_eq!(lines(&m), vec!["first", "first", "second"]);
    assert_eq!(cursor(&m), (1, 0));
    assert_eq!(m.state().register.get(), Some("first"));
}

#[test]
fn paste_above_keeps_row() {
    let mut m = model_with(&["first", "second"]);
    replay(&mut m, &chars("jyP"));
    assert_eq!(lines(&m), vec!["first", "second", "second"]);
    assert_eq!(cursor(&m), (1, 0));
}

#[test]
fn yank_logs_message_without_modifying() {
    let mut m = model_with(&["abc"]);
    replay(&mut m, &chars("y"));
    assert_eq!(last_message(&m).map(|(s, _)| s), Some(Severity::Log));
    assert!(!m.state().modified);
}

#[test]
fn paste_with_empty_register_warns() {
    let mut m = model_with(&["abc"]);
    replay(&mut m, &chars("p"));
    assert_eq!(lines(&m), vec!["abc"]);
    assert_eq!(
        last_message(&m),
        Some((Severity::Warn, "nothing to paste".into()))
    );
}

#[test]
fn delete_line_fills_register() {
    let mut m = model_with(&["a", "b", "c"]);
    replay(&mut m, &chars("Gdd"));
    assert_eq!(lines(&m), vec!["a", "b"]);
    assert_eq!(cursor(&m), (1, 0));
    replay(&mut m, &chars("ggp"));
    assert_eq!(lines(&m), vec!["a", "c", "b"]);
}

#[test]
fn delete_only_line_leaves_empty_line() {
    let mut m = model_with(&["solo"]);
    replay(&mut m, &chars("$dd"));
    assert_eq!(lines(&m), vec![""]);
    assert_eq!(cursor(&m), (0, 0));
    assert_eq!(m.state().register.get(), Some("solo"));
    assert!(m.state().modified);
}

#[test]
fn count_is_cleared_by_register_commands() {
    let mut m = model_with(&["a", "b", "c"]);
    replay(&mut m, &chars("2yj"));
    assert_eq!(cursor(&m), (1, 0));
}
