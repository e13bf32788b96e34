// Artsey Input Layer - Device Filtering
// Which evdev devices to read chords from

/// Check if a device should be read.
///
/// With an explicit filter, only devices whose path or name matches an
/// entry are used, keyboard or not. Without one, every keyboard is used.
pub fn matches_device_filter(
    device_name: &str,
    device_path: &str,
    filter_names: &[String],
    is_keyboard: bool,
) -> bool {
    if !filter_names.is_empty() {
        return filter_names
            .iter()
            .any(|match_name| device_path == match_name || device_name == match_name);
    }

    is_keyboard
}
