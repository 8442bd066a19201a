#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, handle_key};
use core_config::Config;
use core_events::{KeyCode, KeyEvent, KeySource, ScriptedKeySource};
use core_model::{EditorModel, View, Viewport};
use core_state::{EditorState, Severity};
use core_text::{Buffer, Position};

#[derive(Clone, Copy, Debug)]
pub enum Stroke {
    Char(char),
    Key(KeyCode),
    Ctrl(char),
}

impl Stroke {
    pub fn to_event(self) -> KeyEvent {
        match self {
            Stroke::Char(c) => KeyEvent::char(c),
            Stroke::Key(code) => KeyEvent::new(code),
            Stroke::Ctrl(c) => KeyEvent::ctrl(c),
        }
    }
}

/// Plain characters as strokes.
pub fn chars(s: &str) -> Vec<Stroke> {
    s.chars().map(Stroke::Char).collect()
}

pub fn model_with(lines: &[&str]) -> EditorModel {
    model_from_state(EditorState::new(Buffer::from_lines(lines)))
}

pub fn model_from_state(state: EditorState) -> EditorModel {
    EditorModel::with_view(state, View::new(Position::origin(), Viewport::new(10, 40)))
}

/// Outcome of a replay: how many top-level keys were consumed and whether
/// the session asked to quit.
pub struct Replay {
    pub quit: bool,
    pub results: Vec<DispatchResult>,
}

/// Feed every stroke through `handle_key` the way the host loop does: each
/// top-level key is pulled from the same source that nested reads use.
pub fn replay(model: &mut EditorModel, strokes: &[Stroke]) -> Replay {
    replay_with_config(model, strokes, &Config::default())
}

pub fn replay_with_config(model: &mut EditorModel, strokes: &[Stroke], cfg: &Config) -> Replay {
    let mut keys = ScriptedKeySource::new(strokes.iter().map(|s| s.to_event()));
    let mut results = Vec::new();
    while keys.remaining() > 0 {
        let key = keys.read_key().unwrap();
        let res = handle_key(model, key, &mut keys, cfg).unwrap();
        results.push(res);
        if res.quit {
            return Replay {
                quit: true,
                results,
            };
        }
    }
    Replay {
        quit: false,
        results,
    }
}

pub fn lines(model: &EditorModel) -> Vec<String> {
    model.state().buffer().lines().collect()
}

pub fn cursor(model: &EditorModel) -> (usize, usize) {
    let c = model.view().cursor;
    (c.line, c.col)
}

pub fn last_message(model: &EditorModel) -> Option<(Severity, String)> {
    model
        .state()
        .messages
        .last()
        .map(|m| (m.severity, m.text.clone()))
}
