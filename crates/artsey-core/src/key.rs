// Artsey Key Types
// Printable physical key identifiers and the special keys that have none

use std::fmt;
use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::ConfigError;

/// A physical key identifier: one key on the user's real keyboard,
/// identified by the character it types without modifiers.
///
/// ASCII letters are stored lower-case so that `A` and `a` name the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Key(char);

impl Key {
    /// Create a key from the character it produces.
    ///
    /// Returns `None` for whitespace and control characters, which have no
    /// printable identity.
    pub fn new(c: char) -> Option<Self> {
        if c.is_whitespace() || c.is_control() {
            return None;
        }
        Some(Key(c.to_ascii_lowercase()))
    }

    /// Get the character this key produces
    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Key {
    type Err = ConfigError;

    /// Parse a key from a single character (`a`, `;`) or a key name
    /// (`SEMICOLON`, `KEY_1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::new(c).ok_or_else(|| ConfigError::InvalidKey(s.to_string()));
        }
        key_from_name(trimmed).ok_or_else(|| ConfigError::InvalidKey(s.to_string()))
    }
}

/// Parse a list of key identifiers as given on the command line
pub fn parse_keys<S: AsRef<str>>(names: &[S]) -> Result<Vec<Key>, ConfigError> {
    names.iter().map(|name| name.as_ref().parse()).collect()
}

/// Try to parse a key name to a printable key
pub fn key_from_name(name: &str) -> Option<Key> {
    const NAMED: &[(&str, char)] = &[
        ("KEY_1", '1'),
        ("KEY_2", '2'),
        ("KEY_3", '3'),
        ("KEY_4", '4'),
        ("KEY_5", '5'),
        ("KEY_6", '6'),
        ("KEY_7", '7'),
        ("KEY_8", '8'),
        ("KEY_9", '9'),
        ("KEY_0", '0'),
        ("MINUS", '-'),
        ("EQUAL", '='),
        ("LEFT_BRACE", '['),
        ("RIGHT_BRACE", ']'),
        ("SEMICOLON", ';'),
        ("APOSTROPHE", '\''),
        ("GRAVE", '`'),
        ("BACKSLASH", '\\'),
        ("COMMA", ','),
        ("DOT", '.'),
        ("PERIOD", '.'),
        ("SLASH", '/'),
    ];

    let name_upper = name.to_uppercase();
    NAMED
        .iter()
        .find(|(n, _)| *n == name_upper)
        .and_then(|(_, c)| Key::new(*c))
}

/// Keys without a printable identity.
///
/// The resolver never tracks these; the only one it reacts to is the
/// configured termination key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SpecialKey {
    #[strum(to_string = "ESC", serialize = "ESCAPE")]
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftMeta,
    RightMeta,
    CapsLock,
    #[strum(disabled)]
    Other,
}

/// A key as seen at the input-adaptation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    Printable(Key),
    Special(SpecialKey),
}

impl KeyInput {
    /// Classify a character: printable keys keep their identity,
    /// anything else becomes a special key.
    pub fn from_char(c: char) -> Self {
        match Key::new(c) {
            Some(key) => KeyInput::Printable(key),
            None if c == ' ' => KeyInput::Special(SpecialKey::Space),
            None if c == '\t' => KeyInput::Special(SpecialKey::Tab),
            None if c == '\n' || c == '\r' => KeyInput::Special(SpecialKey::Enter),
            None => KeyInput::Special(SpecialKey::Other),
        }
    }
}

impl From<Key> for KeyInput {
    fn from(key: Key) -> Self {
        KeyInput::Printable(key)
    }
}

impl From<SpecialKey> for KeyInput {
    fn from(key: SpecialKey) -> Self {
        KeyInput::Special(key)
    }
}
