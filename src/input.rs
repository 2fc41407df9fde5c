//! Keyboard handling for the game screen.
//!
//! Terminals report key presses, not held keys, so every press (or
//! auto-repeat) since the previous tick counts as the key being down for
//! that tick.

use crate::game::TickInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a single key event means to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Jump (Space or Up).
    Jump,
    /// Restart after a crash (Enter).
    Confirm,
    /// Leave the game (Esc, q, Ctrl-C).
    Quit,
    /// Any other key.
    Other,
}

/// Map a key event to an action.
pub fn map_key(key: &KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Other;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => KeyAction::Jump,
        KeyCode::Enter => KeyAction::Confirm,
        KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        _ => KeyAction::Other,
    }
}

/// Collects key events between two ticks.
#[derive(Debug, Default)]
pub struct InputLatch {
    pending: TickInput,
    quit: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event.
    pub fn handle_key(&mut self, key: &KeyEvent) {
        match map_key(key) {
            KeyAction::Jump => self.pending.jump = true,
            KeyAction::Confirm => self.pending.confirm = true,
            KeyAction::Quit => self.quit = true,
            KeyAction::Other => {}
        }
    }

    /// Input for the tick about to run. Clears the latch.
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
