// Ubermap Mapping Tables
// Static remapping policy: direct map, modifier layer, mouse layer

use std::fmt;
use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{MapperError, MapperResult};
use crate::key::{key_from_name, Key, KEY_CNT};

/// Flat keycode → keycode table. Entry 0 means "no override".
#[derive(Clone, PartialEq, Eq)]
pub struct KeyTable {
    entries: [u16; KEY_CNT],
}

impl KeyTable {
    pub const fn empty() -> Self {
        Self {
            entries: [0; KEY_CNT],
        }
    }

    /// Every code maps to itself (code 0 stays "no override").
    pub fn identity() -> Self {
        let mut table = Self::empty();
        for (code, entry) in table.entries.iter_mut().enumerate() {
            *entry = code as u16;
        }
        table
    }

    pub fn from_pairs(pairs: &[(Key, Key)]) -> Self {
        let mut table = Self::empty();
        for &(from, to) in pairs {
            table.set(from, to);
        }
        table
    }

    /// Override for `key`, if any. Out-of-range codes have none.
    pub fn get(&self, key: Key) -> Option<Key> {
        let code = self.entries[key.index()?];
        (code != 0).then_some(Key(code))
    }

    /// Codes at or above KEY_CNT are ignored; validation rejects them earlier.
    pub fn set(&mut self, from: Key, to: Key) {
        if let (Some(idx), Some(_)) = (from.index(), to.index()) {
            self.entries[idx] = to.0;
        }
    }

    pub fn clear(&mut self, from: Key) {
        if let Some(idx) = from.index() {
            self.entries[idx] = 0;
        }
    }

    /// Number of overridden codes
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|c| **c != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, Key)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, to)| **to != 0)
            .map(|(from, to)| (Key(from as u16), Key(*to)))
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for KeyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Pointer direction in the mouse layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Slot in the pressed-direction array
    pub fn index(self) -> usize {
        self as usize
    }
}

/// What a key does while the mouse layer is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseAction {
    #[default]
    None,
    /// Pointer button (BTN_LEFT, BTN_RIGHT, ...), forwarded as EV_KEY
    Button(Key),
    /// One REL_WHEEL +1 per press (BTN_GEAR_UP)
    WheelUp,
    /// One REL_WHEEL -1 per press (BTN_GEAR_DOWN)
    WheelDown,
    /// Held cursor direction, driven by the pointer pump
    Move(Direction),
}

impl MouseAction {
    pub fn is_none(&self) -> bool {
        matches!(self, MouseAction::None)
    }
}

impl fmt::Display for MouseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouseAction::None => write!(f, "NONE"),
            MouseAction::Button(key) => write!(f, "{}", key),
            MouseAction::WheelUp => write!(f, "WHEEL_UP"),
            MouseAction::WheelDown => write!(f, "WHEEL_DOWN"),
            MouseAction::Move(dir) => write!(f, "MOVE_{}", dir),
        }
    }
}

impl FromStr for MouseAction {
    type Err = String;

    /// Parses `NONE`, `WHEEL_UP`/`GEAR_UP`/`BTN_GEAR_UP`,
    /// `WHEEL_DOWN`/`GEAR_DOWN`/`BTN_GEAR_DOWN`, `MOVE_<DIR>` and any
    /// pointer button name such as `BTN_LEFT`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "NONE" | "" => return Ok(MouseAction::None),
            "WHEEL_UP" | "GEAR_UP" | "BTN_GEAR_UP" => return Ok(MouseAction::WheelUp),
            "WHEEL_DOWN" | "GEAR_DOWN" | "BTN_GEAR_DOWN" => return Ok(MouseAction::WheelDown),
            _ => {}
        }
        if let Some(dir) = upper.strip_prefix("MOVE_") {
            return Direction::from_str(dir)
                .map(MouseAction::Move)
                .map_err(|_| format!("Unknown pointer direction: {}", s));
        }
        match key_from_name(&upper) {
            Some(key) if key.is_mouse_button() => Ok(MouseAction::Button(key)),
            _ => Err(format!("Unknown mouse action: {}", s)),
        }
    }
}

/// Flat keycode → mouse action table
#[derive(Clone, PartialEq, Eq)]
pub struct MouseTable {
    entries: [MouseAction; KEY_CNT],
}

impl MouseTable {
    pub const fn empty() -> Self {
        Self {
            entries: [MouseAction::None; KEY_CNT],
        }
    }

    pub fn from_pairs(pairs: &[(Key, MouseAction)]) -> Self {
        let mut table = Self::empty();
        for &(from, action) in pairs {
            table.set(from, action);
        }
        table
    }

    pub fn get(&self, key: Key) -> MouseAction {
        key.index()
            .map(|idx| self.entries[idx])
            .unwrap_or(MouseAction::None)
    }

    pub fn set(&mut self, from: Key, action: MouseAction) {
        if let Some(idx) = from.index() {
            self.entries[idx] = action;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.iter().filter(|a| !a.is_none()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Key, MouseAction)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_none())
            .map(|(from, a)| (Key(from as u16), *a))
    }
}

impl Default for MouseTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for MouseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Lower bound for the accelerated step ceiling
pub const MIN_MAX_STEP: i32 = 20;

/// Pointer speed parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseSpeed {
    /// Base pixels per pump tick
    pub sensitivity: f64,
    /// Hold time after which the pointer starts accelerating
    pub speedup_ms: u64,
    /// Ceiling for the accelerated step
    pub max_step: i32,
}

impl Default for MouseSpeed {
    fn default() -> Self {
        Self {
            sensitivity: 2.0,
            speedup_ms: 400,
            max_step: 30,
        }
    }
}

/// The complete, immutable remapping policy.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingTable {
    /// Applied when no layer is held
    pub direct: KeyTable,
    /// Key that activates the modifier layer while held
    pub mod_key: Option<Key>,
    pub modifier: KeyTable,
    /// Key that activates the mouse layer while held
    pub mouse_key: Option<Key>,
    pub mouse: MouseTable,
    pub speed: MouseSpeed,
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::empty()
    }
}

impl MappingTable {
    /// No overrides and both layers disabled: every key passes through.
    pub fn empty() -> Self {
        Self {
            direct: KeyTable::empty(),
            mod_key: None,
            modifier: KeyTable::empty(),
            mouse_key: None,
            mouse: MouseTable::empty(),
            speed: MouseSpeed::default(),
        }
    }

    /// Like `empty`, with an explicit identity direct map.
    pub fn identity() -> Self {
        Self {
            direct: KeyTable::identity(),
            ..Self::empty()
        }
    }

    /// Minimal preset for keyboards whose firmware already provides
    /// navigation layers (Ultimate Hacking Keyboard): only the mouse layer,
    /// on the right Alt key.
    pub fn minimal() -> Self {
        Self {
            mouse_key: Some(Key::RIGHTALT),
            mouse: home_row_mouse(),
            ..Self::empty()
        }
    }

    /// Full preset for generic keyboards.
    ///
    /// CapsLock becomes the navigation layer (vi arrows on HJKL, Home/End,
    /// PageUp/PageDown, editing keys), right Alt the mouse layer, and the ISO
    /// 102nd key an extra left Shift.
    pub fn full() -> Self {
        Self {
            direct: KeyTable::from_pairs(&[(Key::KEY_102ND, Key::LEFTSHIFT)]),
            mod_key: Some(Key::CAPSLOCK),
            modifier: KeyTable::from_pairs(&[
                (Key::H, Key::LEFT),
                (Key::J, Key::DOWN),
                (Key::K, Key::UP),
                (Key::L, Key::RIGHT),
                (Key::Y, Key::HOME),
                (Key::O, Key::END),
                (Key::U, Key::PAGEDOWN),
                (Key::I, Key::PAGEUP),
                (Key::N, Key::BACKSPACE),
                (Key::M, Key::DELETE),
                (Key::P, Key::INSERT),
                (Key::SEMICOLON, Key::ENTER),
                (Key::SPACE, Key::ESC),
                (Key::A, Key::LEFTALT),
                (Key::S, Key::LEFTSHIFT),
                (Key::D, Key::LEFTCTRL),
                (Key::F, Key::LEFTMETA),
            ]),
            mouse_key: Some(Key::RIGHTALT),
            mouse: home_row_mouse(),
            speed: MouseSpeed::default(),
        }
    }

    /// Check the cross-field rules the translator relies on.
    pub fn validate(&self) -> MapperResult<()> {
        if self.mod_key.is_some() && self.mod_key == self.mouse_key {
            return Err(MapperError::Argument(format!(
                "modifier key and mouse key must differ (both are {})",
                self.mod_key.unwrap_or_default()
            )));
        }
        for key in [self.mod_key, self.mouse_key].into_iter().flatten() {
            if key.index().is_none() || key == Key::RESERVED {
                return Err(MapperError::Argument(format!(
                    "layer key code {} is out of range",
                    key.code()
                )));
            }
        }
        let speed = &self.speed;
        if !(speed.sensitivity.is_finite() && speed.sensitivity > 0.0) {
            return Err(MapperError::Argument(format!(
                "mouse sensitivity must be a positive number, got {}",
                speed.sensitivity
            )));
        }
        if speed.max_step < MIN_MAX_STEP {
            return Err(MapperError::Argument(format!(
                "mouse max_step must be at least {}, got {}",
                MIN_MAX_STEP, speed.max_step
            )));
        }
        Ok(())
    }
}

// HJKL moves, F/D left/right click, G middle, U/N wheel.
fn home_row_mouse() -> MouseTable {
    MouseTable::from_pairs(&[
        (Key::H, MouseAction::Move(Direction::Left)),
        (Key::J, MouseAction::Move(Direction::Down)),
        (Key::K, MouseAction::Move(Direction::Up)),
        (Key::L, MouseAction::Move(Direction::Right)),
        (Key::F, MouseAction::Button(Key::BTN_LEFT)),
        (Key::D, MouseAction::Button(Key::BTN_RIGHT)),
        (Key::G, MouseAction::Button(Key::BTN_MIDDLE)),
        (Key::SPACE, MouseAction::Button(Key::BTN_LEFT)),
        (Key::U, MouseAction::WheelUp),
        (Key::N, MouseAction::WheelDown),
    ])
}

/// Built-in starting points for a mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Preset {
    #[default]
    Full,
    #[strum(to_string = "minimal", serialize = "uhk")]
    Minimal,
    Empty,
}

impl Preset {
    pub fn table(self) -> MappingTable {
        match self {
            Preset::Full => MappingTable::full(),
            Preset::Minimal => MappingTable::minimal(),
            Preset::Empty => MappingTable::empty(),
        }
    }

    /// Device-name substrings the preset is meant for. Empty means any.
    pub fn default_allow_list(self) -> &'static [&'static str] {
        match self {
            Preset::Minimal => &["Ultimate Hacking Keyboard"],
            Preset::Full | Preset::Empty => &[],
        }
    }
}
