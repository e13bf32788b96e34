// Artsey Input Layer - Device Detection
// Keyboard detection from evdev capabilities

use std::collections::HashSet;

use crate::input::keycodes::key_code;
use crate::Key;

/// Device capabilities extracted from an evdev device
#[derive(Debug, Clone)]
pub struct DeviceCapabilities {
    /// Whether the device supports EV_KEY events
    pub has_ev_key: bool,
    /// Supported key codes (EV_KEY capability codes)
    pub supported_keys: HashSet<u16>,
}

impl DeviceCapabilities {
    pub fn new(has_ev_key: bool, supported_keys: impl IntoIterator<Item = u16>) -> Self {
        Self {
            has_ev_key,
            supported_keys: supported_keys.into_iter().collect(),
        }
    }

    /// Check if a specific key code is supported
    pub fn supports_key(&self, key_code: u16) -> bool {
        self.supported_keys.contains(&key_code)
    }

    /// Chord keys this device cannot type
    pub fn missing_keys(&self, keys: &[Key]) -> Vec<Key> {
        keys.iter()
            .copied()
            .filter(|key| !key_code(*key).is_some_and(|code| self.supports_key(code)))
            .collect()
    }
}

// QWERTY row key codes: Q, W, E, R, T, Y
const QWERTY_CODES: &[u16] = &[16, 17, 18, 19, 20, 21];

// SPACE, A, Z
const A_Z_SPACE_CODES: &[u16] = &[57, 30, 44];

/// A device is a keyboard if it reports EV_KEY with the whole QWERTY row
/// plus A, Z and SPACE.
pub fn is_keyboard(capabilities: &DeviceCapabilities) -> bool {
    capabilities.has_ev_key
        && QWERTY_CODES
            .iter()
            .chain(A_Z_SPACE_CODES)
            .all(|code| capabilities.supports_key(*code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keyboard_caps() -> DeviceCapabilities {
        let mut keys = vec![0];
        keys.extend_from_slice(QWERTY_CODES);
        keys.extend_from_slice(A_Z_SPACE_CODES);
        keys.extend_from_slice(&[31, 32, 33, 36, 37, 38, 39]); // S D F J K L ;
        DeviceCapabilities::new(true, keys)
    }

    #[test]
    fn test_is_keyboard_with_full_keyboard() {
        assert!(is_keyboard(&make_keyboard_caps()));
    }

    #[test]
    fn test_is_keyboard_without_qwerty() {
        let caps = DeviceCapabilities::new(true, A_Z_SPACE_CODES.iter().copied());
        assert!(!is_keyboard(&caps));
    }

    #[test]
    fn test_is_keyboard_with_no_ev_key() {
        let caps = DeviceCapabilities::new(false, QWERTY_CODES.iter().copied());
        assert!(!is_keyboard(&caps));
    }

    #[test]
    fn test_is_keyboard_mouse_device() {
        // BTN_LEFT, BTN_RIGHT, BTN_MIDDLE
        let caps = DeviceCapabilities::new(true, [272, 273, 274]);
        assert!(!is_keyboard(&caps));
    }

    #[test]
    fn test_missing_keys() {
        let caps = make_keyboard_caps();
        let keys: Vec<Key> = "asdfjkl;".chars().filter_map(Key::new).collect();
        assert!(caps.missing_keys(&keys).is_empty());

        let keys: Vec<Key> = "asdm".chars().filter_map(Key::new).collect();
        assert_eq!(caps.missing_keys(&keys), vec![Key::new('m').unwrap()]);
    }
}
