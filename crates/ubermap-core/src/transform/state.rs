// Ubermap Layer State
// Which layer is held and which pointer directions are down

use crate::mapping::Direction;

/// Runtime state owned by the translator.
///
/// Invariants kept by every mutator:
/// - at most one of the two layers is engaged;
/// - `motion_start_ms` is set iff at least one direction is held;
/// - directions are only held while the mouse layer is engaged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerState {
    mod_pressed: bool,
    mouse_pressed: bool,
    dir_pressed: [bool; 4],
    motion_start_ms: Option<u64>,
}

impl LayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mod_pressed(&self) -> bool {
        self.mod_pressed
    }

    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    pub fn direction_pressed(&self, dir: Direction) -> bool {
        self.dir_pressed[dir.index()]
    }

    /// When the current pointer motion began, `None` while idle
    pub fn motion_start_ms(&self) -> Option<u64> {
        self.motion_start_ms
    }

    pub fn motion_active(&self) -> bool {
        self.motion_start_ms.is_some()
    }

    /// Engaging the modifier layer disengages the mouse layer.
    pub fn set_modifier(&mut self, pressed: bool) {
        if pressed && self.mouse_pressed {
            self.set_mouse(false);
        }
        self.mod_pressed = pressed;
    }

    /// Engaging the mouse layer disengages the modifier layer; releasing it
    /// drops every held direction.
    pub fn set_mouse(&mut self, pressed: bool) {
        if pressed {
            self.mod_pressed = false;
        } else {
            self.dir_pressed = [false; 4];
            self.motion_start_ms = None;
        }
        self.mouse_pressed = pressed;
    }

    /// Record a direction key. Ignored unless the mouse layer is engaged.
    pub fn set_direction(&mut self, dir: Direction, pressed: bool, now_ms: u64) {
        if !self.mouse_pressed {
            return;
        }
        self.dir_pressed[dir.index()] = pressed;
        if self.dir_pressed.iter().any(|d| *d) {
            self.motion_start_ms.get_or_insert(now_ms);
        } else {
            self.motion_start_ms = None;
        }
    }

    /// Unit motion per axis, `None` for an axis with no direction held.
    /// Opposed directions cancel to `Some(0)`.
    pub fn motion_vector(&self) -> (Option<i32>, Option<i32>) {
        let axis = |neg: Direction, pos: Direction| {
            let (n, p) = (self.direction_pressed(neg), self.direction_pressed(pos));
            (n || p).then(|| i32::from(p) - i32::from(n))
        };
        (
            axis(Direction::Left, Direction::Right),
            axis(Direction::Up, Direction::Down),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_are_exclusive() {
        let mut state = LayerState::new();
        state.set_modifier(true);
        state.set_mouse(true);
        assert!(state.mouse_pressed());
        assert!(!state.mod_pressed());

        state.set_modifier(true);
        assert!(state.mod_pressed());
        assert!(!state.mouse_pressed());
    }

    #[test]
    fn test_motion_start_follows_directions() {
        let mut state = LayerState::new();
        state.set_mouse(true);
        state.set_direction(Direction::Left, true, 100);
        assert_eq!(state.motion_start_ms(), Some(100));

        // A second direction keeps the original start
        state.set_direction(Direction::Up, true, 150);
        assert_eq!(state.motion_start_ms(), Some(100));

        state.set_direction(Direction::Left, false, 160);
        assert_eq!(state.motion_start_ms(), Some(100));
        state.set_direction(Direction::Up, false, 170);
        assert_eq!(state.motion_start_ms(), None);
    }

    #[test]
    fn test_directions_ignored_outside_mouse_layer() {
        let mut state = LayerState::new();
        state.set_direction(Direction::Right, true, 10);
        assert!(!state.direction_pressed(Direction::Right));
        assert!(!state.motion_active());
    }

    #[test]
    fn test_mouse_release_clears_motion() {
        let mut state = LayerState::new();
        state.set_mouse(true);
        state.set_direction(Direction::Down, true, 5);
        state.set_mouse(false);
        assert!(!state.direction_pressed(Direction::Down));
        assert!(!state.motion_active());
    }

    #[test]
    fn test_modifier_engage_clears_motion() {
        let mut state = LayerState::new();
        state.set_mouse(true);
        state.set_direction(Direction::Down, true, 5);
        state.set_modifier(true);
        assert!(!state.motion_active());
    }

    #[test]
    fn test_motion_vector() {
        let mut state = LayerState::new();
        state.set_mouse(true);
        assert_eq!(state.motion_vector(), (None, None));

        state.set_direction(Direction::Right, true, 0);
        assert_eq!(state.motion_vector(), (Some(1), None));

        state.set_direction(Direction::Left, true, 0);
        assert_eq!(state.motion_vector(), (Some(0), None));

        state.set_direction(Direction::Up, true, 0);
        assert_eq!(state.motion_vector(), (Some(0), Some(-1)));
    }
}
