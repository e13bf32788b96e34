// Artsey Input Layer - Scan Codes
// Linux input-event-codes (US QWERTY) to printable keys and special keys

use crate::key::{KeyInput, SpecialKey};
use crate::Key;

/// Unshifted character produced by each printable scan code
const PRINTABLE_CODES: &[(u16, char)] = &[
    (2, '1'),
    (3, '2'),
    (4, '3'),
    (5, '4'),
    (6, '5'),
    (7, '6'),
    (8, '7'),
    (9, '8'),
    (10, '9'),
    (11, '0'),
    (12, '-'),
    (13, '='),
    (16, 'q'),
    (17, 'w'),
    (18, 'e'),
    (19, 'r'),
    (20, 't'),
    (21, 'y'),
    (22, 'u'),
    (23, 'i'),
    (24, 'o'),
    (25, 'p'),
    (26, '['),
    (27, ']'),
    (30, 'a'),
    (31, 's'),
    (32, 'd'),
    (33, 'f'),
    (34, 'g'),
    (35, 'h'),
    (36, 'j'),
    (37, 'k'),
    (38, 'l'),
    (39, ';'),
    (40, '\''),
    (41, '`'),
    (43, '\\'),
    (44, 'z'),
    (45, 'x'),
    (46, 'c'),
    (47, 'v'),
    (48, 'b'),
    (49, 'n'),
    (50, 'm'),
    (51, ','),
    (52, '.'),
    (53, '/'),
];

const SPECIAL_CODES: &[(u16, SpecialKey)] = &[
    (1, SpecialKey::Escape),
    (14, SpecialKey::Backspace),
    (15, SpecialKey::Tab),
    (28, SpecialKey::Enter),
    (29, SpecialKey::LeftCtrl),
    (42, SpecialKey::LeftShift),
    (54, SpecialKey::RightShift),
    (56, SpecialKey::LeftAlt),
    (57, SpecialKey::Space),
    (58, SpecialKey::CapsLock),
    (96, SpecialKey::Enter), // KPENTER
    (97, SpecialKey::RightCtrl),
    (100, SpecialKey::RightAlt),
    (102, SpecialKey::Home),
    (103, SpecialKey::Up),
    (104, SpecialKey::PageUp),
    (105, SpecialKey::Left),
    (106, SpecialKey::Right),
    (107, SpecialKey::End),
    (108, SpecialKey::Down),
    (109, SpecialKey::PageDown),
    (110, SpecialKey::Insert),
    (111, SpecialKey::Delete),
    (125, SpecialKey::LeftMeta),
    (126, SpecialKey::RightMeta),
];

/// Classify a scan code. Codes with no printable character are special keys.
pub fn translate_code(code: u16) -> KeyInput {
    if let Some(key) = printable_key(code) {
        return KeyInput::Printable(key);
    }
    let special = SPECIAL_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, special)| *special)
        .unwrap_or(SpecialKey::Other);
    KeyInput::Special(special)
}

/// Printable key for a scan code
pub fn printable_key(code: u16) -> Option<Key> {
    PRINTABLE_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .and_then(|(_, ch)| Key::new(*ch))
}

/// Scan code that types a printable key
pub fn key_code(key: Key) -> Option<u16> {
    PRINTABLE_CODES
        .iter()
        .find(|(_, ch)| *ch == key.as_char())
        .map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_letters_and_punctuation() {
        assert_eq!(translate_code(30), KeyInput::Printable(Key::new('a').unwrap()));
        assert_eq!(translate_code(39), KeyInput::Printable(Key::new(';').unwrap()));
        assert_eq!(translate_code(11), KeyInput::Printable(Key::new('0').unwrap()));
    }

    #[test]
    fn test_translate_special() {
        assert_eq!(translate_code(1), KeyInput::Special(SpecialKey::Escape));
        assert_eq!(translate_code(57), KeyInput::Special(SpecialKey::Space));
        assert_eq!(translate_code(42), KeyInput::Special(SpecialKey::LeftShift));
        assert_eq!(translate_code(59), KeyInput::Special(SpecialKey::Other)); // F1
    }

    #[test]
    fn test_key_code_round_trip() {
        for (code, ch) in PRINTABLE_CODES {
            let key = Key::new(*ch).unwrap();
            assert_eq!(key_code(key), Some(*code));
            assert_eq!(printable_key(*code), Some(key));
        }
    }
}
