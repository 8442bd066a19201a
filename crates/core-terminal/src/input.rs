//! crossterm event -> `core_events::KeyEvent` mapping.

use core_events::{KeyCode, KeyEvent, KeyModifiers, KeySource};
use crossterm::event::{
    self, Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind as CKind,
    KeyModifiers as CKeyModifiers,
};

/// Map one crossterm key event. Releases and keys the editor has no use for
/// (function keys, media keys, ...) yield `None`.
pub fn map_key_event(ev: &CKeyEvent) -> Option<KeyEvent> {
    if !matches!(ev.kind, CKind::Press | CKind::Repeat) {
        return None;
    }
    let code = match ev.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    let mut mods = KeyModifiers::empty();
    if ev.modifiers.contains(CKeyModifiers::CONTROL) {
        mods |= KeyModifiers::CTRL;
    }
    if ev.modifiers.contains(CKeyModifiers::ALT) {
        mods |= KeyModifiers::ALT;
    }
    if ev.modifiers.contains(CKeyModifiers::SHIFT) {
        mods |= KeyModifiers::SHIFT;
    }
    Some(KeyEvent { code, mods })
}

/// Blocking key source over `crossterm::event::read`. Non-key events
/// (resize, focus, mouse, paste) are skipped.
#[derive(Debug, Default)]
pub struct CrosstermKeySource;

impl KeySource for CrosstermKeySource {
    fn read_key(&mut self) -> anyhow::Result<KeyEvent> {
        loop {
            match event::read()? {
                CEvent::Key(ev) => {
                    if let Some(key) = map_key_event(&ev) {
                        return Ok(key);
                    }
                    tracing::trace!(target: "terminal", code = ?ev.code, kind = ?ev.kind, "key_skipped");
                }
                other => {
                    tracing::trace!(target: "terminal", event = ?other, "event_skipped");
                }
            }
        }
    }
}
