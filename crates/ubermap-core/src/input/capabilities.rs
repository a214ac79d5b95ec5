// Ubermap Input Layer - Device Detection
// Keyboard detection from EV_KEY capabilities

use std::collections::HashSet;

use crate::Key;

/// What a device reports it can emit.
#[derive(Debug, Clone, Default)]
pub struct DeviceCapabilities {
    /// Whether the device supports EV_KEY events
    pub has_ev_key: bool,
    /// Supported key codes
    pub supported_keys: HashSet<u16>,
}

impl DeviceCapabilities {
    pub fn new(has_ev_key: bool, supported_keys: impl IntoIterator<Item = u16>) -> Self {
        Self {
            has_ev_key,
            supported_keys: supported_keys.into_iter().collect(),
        }
    }

    pub fn supports_key(&self, key: Key) -> bool {
        self.supported_keys.contains(&key.code())
    }

    #[cfg(feature = "device")]
    pub fn from_device(device: &evdev::raw_stream::RawDevice) -> Self {
        let has_ev_key = device.supported_events().contains(evdev::EventType::KEY);
        let keys = device
            .supported_keys()
            .map(|keys| keys.iter().map(|k| k.code()).collect::<Vec<_>>())
            .unwrap_or_default();
        Self::new(has_ev_key, keys)
    }
}

// Q W E R T Y
const QWERTY: [Key; 6] = [Key::Q, Key::W, Key::E, Key::R, Key::T, Key::Y];
const A_Z_SPACE: [Key; 3] = [Key::SPACE, Key::A, Key::Z];

/// A device counts as a keyboard when it supports EV_KEY and has the whole
/// QWERTY row plus A, Z and SPACE. Mice, power buttons and media remotes
/// fail this test.
pub fn is_keyboard(capabilities: &DeviceCapabilities) -> bool {
    capabilities.has_ev_key
        && QWERTY.iter().all(|k| capabilities.supports_key(*k))
        && A_Z_SPACE.iter().all(|k| capabilities.supports_key(*k))
}

/// Whether `name` is our own output device (or another instance's).
pub fn is_virtual_device(name: &str) -> bool {
    name.contains(crate::output::VIRTUAL_DEVICE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard_caps() -> DeviceCapabilities {
        let mut keys: Vec<u16> = QWERTY.iter().chain(A_Z_SPACE.iter()).map(|k| k.code()).collect();
        keys.extend_from_slice(&[1, 14, 15, 28, 29, 42, 56]); // ESC, BACKSPACE, TAB, ENTER, CTRL, SHIFT, ALT
        DeviceCapabilities::new(true, keys)
    }

    #[test]
    fn test_full_keyboard() {
        assert!(is_keyboard(&keyboard_caps()));
    }

    #[test]
    fn test_mouse_is_not_keyboard() {
        let caps = DeviceCapabilities::new(true, [0x110, 0x111, 0x112]);
        assert!(!is_keyboard(&caps));
    }

    #[test]
    fn test_missing_qwerty_row() {
        let caps = DeviceCapabilities::new(true, [57, 30, 44, 16, 17]);
        assert!(!is_keyboard(&caps));
    }

    #[test]
    fn test_no_ev_key() {
        let mut caps = keyboard_caps();
        caps.has_ev_key = false;
        assert!(!is_keyboard(&caps));
    }

    #[test]
    fn test_virtual_device_name() {
        assert!(is_virtual_device("UberKeyboardMapper"));
        assert!(!is_virtual_device("AT Translated Set 2 keyboard"));
    }
}
