// Artsey Input Layer - Key Events
// The closed event shape handed from input sources to the resolver

use crate::key::{KeyInput, SpecialKey};
use crate::{Action, Key};

/// A key going down, repeating or coming up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub input: KeyInput,
    pub action: Action,
}

impl KeyEvent {
    pub fn new(input: impl Into<KeyInput>, action: Action) -> Self {
        Self {
            input: input.into(),
            action,
        }
    }

    pub fn press(input: impl Into<KeyInput>) -> Self {
        Self::new(input, Action::Press)
    }

    pub fn release(input: impl Into<KeyInput>) -> Self {
        Self::new(input, Action::Release)
    }

    pub fn repeat(input: impl Into<KeyInput>) -> Self {
        Self::new(input, Action::Repeat)
    }

    /// The printable key, if this event has one
    pub fn key(&self) -> Option<Key> {
        match self.input {
            KeyInput::Printable(key) => Some(key),
            KeyInput::Special(_) => None,
        }
    }

    /// Check if this is the given special key being released
    pub fn is_release_of(&self, special: SpecialKey) -> bool {
        self.action.is_released() && self.input == KeyInput::Special(special)
    }
}
