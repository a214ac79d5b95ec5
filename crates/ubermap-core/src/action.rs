// Ubermap Key Action
// Press/release/repeat state carried in the value field of EV_KEY records

use std::fmt;

/// Action state of a key event.
///
/// The kernel encodes it in `input_event.value`:
///   0 == released
///   1 == pressed
///   2 == autorepeat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Action {
    Release = 0,
    Press = 1,
    Repeat = 2,
}

impl Action {
    /// Held down: press or autorepeat. This is the `value != 0` test the
    /// layer keys and pointer directions use.
    pub fn is_pressed(self) -> bool {
        matches!(self, Action::Press | Action::Repeat)
    }

    pub fn is_released(self) -> bool {
        matches!(self, Action::Release)
    }

    /// Decode an EV_KEY value. Anything outside 0..=2 is malformed.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Action::Release),
            1 => Some(Action::Press),
            2 => Some(Action::Repeat),
            _ => None,
        }
    }

    pub fn value(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Release => write!(f, "release"),
            Action::Press => write!(f, "press"),
            Action::Repeat => write!(f, "repeat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_properties() {
        assert!(Action::Press.is_pressed());
        assert!(Action::Repeat.is_pressed());
        assert!(!Action::Release.is_pressed());
        assert!(Action::Release.is_released());
        assert!(!Action::Repeat.is_released());
    }

    #[test]
    fn test_action_from_value() {
        assert_eq!(Action::from_value(0), Some(Action::Release));
        assert_eq!(Action::from_value(1), Some(Action::Press));
        assert_eq!(Action::from_value(2), Some(Action::Repeat));
        assert_eq!(Action::from_value(3), None);
        assert_eq!(Action::from_value(-1), None);
    }

    #[test]
    fn test_action_value_round_trips_kernel_encoding() {
        for value in 0..=2 {
            assert_eq!(Action::from_value(value).map(Action::value), Some(value));
        }
    }
}
