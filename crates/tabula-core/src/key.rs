//! Keyboard events and the blocking sources that produce them.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::ScreenError;

/// A keystroke as seen by widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Delete the character before the cursor.
    Backspace,
    /// Auxiliary trigger, typically completion.
    Tab,
    /// Submit.
    Enter,
}

impl Key {
    /// Translate a crossterm key event. Keys widgets have no use for map to
    /// `None`, as do key releases.
    pub fn from_crossterm(event: &KeyEvent) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        match (event.code, event.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Some(Key::Char(c)),
            (KeyCode::Backspace, _) => Some(Key::Backspace),
            (KeyCode::Tab, KeyModifiers::NONE) => Some(Key::Tab),
            (KeyCode::Enter, _) => Some(Key::Enter),
            _ => None,
        }
    }
}

/// A blocking producer of key events.
pub trait EventSource {
    /// Block, calling `on_key` once per key event.
    ///
    /// Returns when the source has nothing more to deliver, or with the first
    /// error from either the source or `on_key`.
    fn listen(
        &mut self,
        on_key: &mut dyn FnMut(Key) -> Result<(), ScreenError>,
    ) -> Result<(), ScreenError>;
}

/// A single key press with optional modifier keys (Ctrl, Alt, Shift).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key code.
    pub code: KeyCode,
    /// Modifier keys that must be held alongside the base key.
    pub modifiers: KeyModifiers,
}

impl KeyCombination {
    /// Create a key combination with no modifier keys.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Create a key combination with the Ctrl modifier.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    /// Return whether `event` is this combination.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.code == event.code && event.modifiers.contains(self.modifiers)
    }
}

/// [`EventSource`] reading the real keyboard through crossterm.
///
/// The terminal must be in raw mode (see
/// [`TerminalSession`](crate::session::TerminalSession)) for keys to arrive
/// one at a time. Raw mode also swallows the interrupt signal, so by default
/// Ctrl+C ends [`listen`](EventSource::listen); use
/// [`with_interrupt`](CrosstermKeys::with_interrupt) to change or disable it.
#[derive(Debug, Clone)]
pub struct CrosstermKeys {
    interrupt: Option<KeyCombination>,
}

impl Default for CrosstermKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl CrosstermKeys {
    /// Create a source that stops on Ctrl+C.
    pub fn new() -> Self {
        Self {
            interrupt: Some(KeyCombination::ctrl(KeyCode::Char('c'))),
        }
    }

    /// Set the key that ends listening. `None` listens forever.
    pub fn with_interrupt(mut self, interrupt: Option<KeyCombination>) -> Self {
        self.interrupt = interrupt;
        self
    }
}

impl EventSource for CrosstermKeys {
    fn listen(
        &mut self,
        on_key: &mut dyn FnMut(Key) -> Result<(), ScreenError>,
    ) -> Result<(), ScreenError> {
        loop {
            let Event::Key(event) = event::read()? else {
                continue;
            };
            if event.kind == KeyEventKind::Press
                && self.interrupt.as_ref().is_some_and(|k| k.matches(&event))
            {
                log::debug!("interrupt key received, leaving listen loop");
                return Ok(());
            }
            if let Some(key) = Key::from_crossterm(&event) {
                on_key(key)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn printable_chars_map_to_char() {
        let e = event(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(Key::from_crossterm(&e), Some(Key::Char('a')));
        let e = event(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(Key::from_crossterm(&e), Some(Key::Char('A')));
    }

    #[test]
    fn control_keys_map_to_named_keys() {
        let none = KeyModifiers::NONE;
        assert_eq!(
            Key::from_crossterm(&event(KeyCode::Backspace, none)),
            Some(Key::Backspace)
        );
        assert_eq!(Key::from_crossterm(&event(KeyCode::Tab, none)), Some(Key::Tab));
        assert_eq!(Key::from_crossterm(&event(KeyCode::Enter, none)), Some(Key::Enter));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(
            Key::from_crossterm(&event(KeyCode::Left, KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            Key::from_crossterm(&event(KeyCode::Char('w'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn releases_are_ignored() {
        let mut e = event(KeyCode::Char('a'), KeyModifiers::NONE);
        e.kind = KeyEventKind::Release;
        assert_eq!(Key::from_crossterm(&e), None);
    }

    #[test]
    fn ctrl_combination_matches() {
        let ctrl_c = KeyCombination::ctrl(KeyCode::Char('c'));
        assert!(ctrl_c.matches(&event(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!ctrl_c.matches(&event(KeyCode::Char('c'), KeyModifiers::NONE)));
        let esc = KeyCombination::new(KeyCode::Esc);
        assert!(esc.matches(&event(KeyCode::Esc, KeyModifiers::NONE)));
    }
}
