//! Key event types and the blocking key source contract.
//!
//! The editor loop is single-threaded: it pulls exactly one `KeyEvent` per
//! `KeySource::read_key` call and blocks until one arrives. Two-key command
//! sequences (`gg`, `!Q`, `dd`) perform a second nested read from the same
//! source, so implementations must tolerate re-entrant calls from inside a
//! dispatch step.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

/// Normalized logical keys consumed by the translator. Space arrives as
/// `Char(' ')`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::empty(),
        }
    }
    pub fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }
    pub fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: KeyModifiers::CTRL,
        }
    }

    /// The quit modifier (Ctrl-Q) leaves Insert mode.
    pub fn is_quit_modifier(&self) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
            && matches!(self.code, KeyCode::Char('q') | KeyCode::Char('Q'))
    }

    /// Plain printable character with no Ctrl/Alt chord.
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !c.is_control()
                    && !self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) =>
            {
                Some(c)
            }
            _ => None,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

/// Blocking producer of key events.
pub trait KeySource {
    fn read_key(&mut self) -> anyhow::Result<KeyEvent>;
}

/// Replays a fixed key script; errors once exhausted. Used by tests and
/// non-interactive drivers.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeySource {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedKeySource {
    pub fn new<I: IntoIterator<Item = KeyEvent>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Script made of plain characters.
    pub fn from_chars(s: &str) -> Self {
        Self::new(s.chars().map(KeyEvent::char))
    }

    pub fn push(&mut self, key: KeyEvent) {
        self.keys.push_back(key);
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeySource {
    fn read_key(&mut self) -> anyhow::Result<KeyEvent> {
        self.keys
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("key script exhausted"))
    }
}
