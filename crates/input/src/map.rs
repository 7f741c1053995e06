//! Key mapping from terminal events to client commands.

use arrayvec::{ArrayVec, CapacityError};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{Action, KEY_FIRE_ANGLE, KEY_TURN_STEP};

/// Maximum number of key bindings a [`KeyMap`] can hold.
pub const MAX_BINDINGS: usize = 16;

/// What a key press asks the client to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    /// Send an action to the server.
    Send(Action),
    /// Close the connection gracefully.
    Close,
}

pub type Binding = (KeyCode, KeyCommand);

/// Fixed-capacity key binding table.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: ArrayVec<Binding, MAX_BINDINGS>,
}

impl Default for KeyMap {
    /// Up turns, space fires, escape closes.
    fn default() -> Self {
        let mut bindings = ArrayVec::new();
        bindings.push((
            KeyCode::Up,
            KeyCommand::Send(Action::MoveShip {
                angle: KEY_TURN_STEP,
            }),
        ));
        bindings.push((
            KeyCode::Char(' '),
            KeyCommand::Send(Action::AddBullet {
                angle: KEY_FIRE_ANGLE,
            }),
        ));
        bindings.push((KeyCode::Esc, KeyCommand::Close));
        Self { bindings }
    }
}

impl KeyMap {
    /// A table with no bindings (Ctrl+C still closes).
    pub fn empty() -> Self {
        Self {
            bindings: ArrayVec::new(),
        }
    }

    /// Add a binding, replacing any existing binding for the same key.
    pub fn bind(&mut self, code: KeyCode, command: KeyCommand) -> Result<(), CapacityError<Binding>> {
        if let Some(slot) = self.bindings.iter_mut().find(|(c, _)| *c == code) {
            slot.1 = command;
            return Ok(());
        }
        self.bindings.try_push((code, command))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Map a key event. Releases and unbound keys yield `None`.
    pub fn lookup(&self, key: KeyEvent) -> Option<KeyCommand> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if is_interrupt(key) {
            return Some(KeyCommand::Close);
        }
        self.bindings
            .iter()
            .find(|(code, _)| *code == key.code)
            .map(|(_, command)| *command)
    }
}

/// Ctrl+C always closes, whatever the table says.
pub fn is_interrupt(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
