// Ubermap Key Type
// Key codes from Linux input-event-codes.h and their names

use std::fmt;
use std::str::FromStr;

/// Number of key codes the kernel defines (KEY_MAX + 1).
///
/// Every mapping table is a flat array of this size.
pub const KEY_CNT: usize = 0x300;

/// Highest valid key code (KEY_MAX).
pub const KEY_MAX: u16 = (KEY_CNT - 1) as u16;

/// Represents a single key or button code.
///
/// The numeric values match Linux input-event-codes.h definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Key(pub u16);

impl Key {
    pub const RESERVED: Key = Key(0);
    pub const ESC: Key = Key(1);
    pub const BACKSPACE: Key = Key(14);
    pub const TAB: Key = Key(15);
    pub const Q: Key = Key(16);
    pub const W: Key = Key(17);
    pub const E: Key = Key(18);
    pub const R: Key = Key(19);
    pub const T: Key = Key(20);
    pub const Y: Key = Key(21);
    pub const U: Key = Key(22);
    pub const I: Key = Key(23);
    pub const O: Key = Key(24);
    pub const P: Key = Key(25);
    pub const ENTER: Key = Key(28);
    pub const LEFTCTRL: Key = Key(29);
    pub const A: Key = Key(30);
    pub const S: Key = Key(31);
    pub const D: Key = Key(32);
    pub const F: Key = Key(33);
    pub const G: Key = Key(34);
    pub const H: Key = Key(35);
    pub const J: Key = Key(36);
    pub const K: Key = Key(37);
    pub const L: Key = Key(38);
    pub const SEMICOLON: Key = Key(39);
    pub const LEFTSHIFT: Key = Key(42);
    pub const Z: Key = Key(44);
    pub const X: Key = Key(45);
    pub const C: Key = Key(46);
    pub const V: Key = Key(47);
    pub const B: Key = Key(48);
    pub const N: Key = Key(49);
    pub const M: Key = Key(50);
    pub const COMMA: Key = Key(51);
    pub const DOT: Key = Key(52);
    pub const RIGHTSHIFT: Key = Key(54);
    pub const LEFTALT: Key = Key(56);
    pub const SPACE: Key = Key(57);
    pub const CAPSLOCK: Key = Key(58);
    pub const KEY_102ND: Key = Key(86);
    pub const RIGHTCTRL: Key = Key(97);
    pub const RIGHTALT: Key = Key(100);
    pub const HOME: Key = Key(102);
    pub const UP: Key = Key(103);
    pub const PAGEUP: Key = Key(104);
    pub const LEFT: Key = Key(105);
    pub const RIGHT: Key = Key(106);
    pub const END: Key = Key(107);
    pub const DOWN: Key = Key(108);
    pub const PAGEDOWN: Key = Key(109);
    pub const INSERT: Key = Key(110);
    pub const DELETE: Key = Key(111);
    pub const LEFTMETA: Key = Key(125);
    pub const RIGHTMETA: Key = Key(126);
    pub const COMPOSE: Key = Key(127);
    pub const BTN_LEFT: Key = Key(0x110);
    pub const BTN_RIGHT: Key = Key(0x111);
    pub const BTN_MIDDLE: Key = Key(0x112);
    pub const BTN_SIDE: Key = Key(0x113);
    pub const BTN_EXTRA: Key = Key(0x114);
    pub const BTN_GEAR_DOWN: Key = Key(0x150);
    pub const BTN_GEAR_UP: Key = Key(0x151);

    /// Get the raw numeric code value
    pub fn code(self) -> u16 {
        self.0
    }

    /// Table index for this key, or `None` when it is outside the kernel range.
    pub fn index(self) -> Option<usize> {
        let idx = usize::from(self.0);
        (idx < KEY_CNT).then_some(idx)
    }

    /// Pointer buttons live in the BTN_MOUSE block (0x110..0x120).
    pub fn is_mouse_button(self) -> bool {
        (0x110..0x120).contains(&self.0)
    }

    /// Get the name of this key
    pub fn name(self) -> &'static str {
        key_name(self.0)
    }
}

impl From<u16> for Key {
    fn from(code: u16) -> Self {
        Key(code)
    }
}

impl From<Key> for u16 {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match key_name(self.0) {
            "UNKNOWN" => write!(f, "KEY({})", self.0),
            name => write!(f, "{}", name),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        key_from_name(s).ok_or_else(|| format!("Unknown key: {}", s))
    }
}

// Kernel names from input-event-codes.h without the KEY_ prefix. Buttons
// keep BTN_. Where codes alias, the first entry is the display name.
const KEY_NAMES: &[(u16, &str)] = &[
    (0, "RESERVED"),
    (1, "ESC"),
    (2, "1"),
    (3, "2"),
    (4, "3"),
    (5, "4"),
    (6, "5"),
    (7, "6"),
    (8, "7"),
    (9, "8"),
    (10, "9"),
    (11, "0"),
    (12, "MINUS"),
    (13, "EQUAL"),
    (14, "BACKSPACE"),
    (15, "TAB"),
    (16, "Q"),
    (17, "W"),
    (18, "E"),
    (19, "R"),
    (20, "T"),
    (21, "Y"),
    (22, "U"),
    (23, "I"),
    (24, "O"),
    (25, "P"),
    (26, "LEFTBRACE"),
    (27, "RIGHTBRACE"),
    (28, "ENTER"),
    (29, "LEFTCTRL"),
    (30, "A"),
    (31, "S"),
    (32, "D"),
    (33, "F"),
    (34, "G"),
    (35, "H"),
    (36, "J"),
    (37, "K"),
    (38, "L"),
    (39, "SEMICOLON"),
    (40, "APOSTROPHE"),
    (41, "GRAVE"),
    (42, "LEFTSHIFT"),
    (43, "BACKSLASH"),
    (44, "Z"),
    (45, "X"),
    (46, "C"),
    (47, "V"),
    (48, "B"),
    (49, "N"),
    (50, "M"),
    (51, "COMMA"),
    (52, "DOT"),
    (53, "SLASH"),
    (54, "RIGHTSHIFT"),
    (55, "KPASTERISK"),
    (56, "LEFTALT"),
    (57, "SPACE"),
    (58, "CAPSLOCK"),
    (59, "F1"),
    (60, "F2"),
    (61, "F3"),
    (62, "F4"),
    (63, "F5"),
    (64, "F6"),
    (65, "F7"),
    (66, "F8"),
    (67, "F9"),
    (68, "F10"),
    (69, "NUMLOCK"),
    (70, "SCROLLLOCK"),
    (71, "KP7"),
    (72, "KP8"),
    (73, "KP9"),
    (74, "KPMINUS"),
    (75, "KP4"),
    (76, "KP5"),
    (77, "KP6"),
    (78, "KPPLUS"),
    (79, "KP1"),
    (80, "KP2"),
    (81, "KP3"),
    (82, "KP0"),
    (83, "KPDOT"),
    (85, "ZENKAKUHANKAKU"),
    (86, "102ND"),
    (87, "F11"),
    (88, "F12"),
    (89, "RO"),
    (90, "KATAKANA"),
    (91, "HIRAGANA"),
    (92, "HENKAN"),
    (93, "KATAKANAHIRAGANA"),
    (94, "MUHENKAN"),
    (95, "KPJPCOMMA"),
    (96, "KPENTER"),
    (97, "RIGHTCTRL"),
    (98, "KPSLASH"),
    (99, "SYSRQ"),
    (100, "RIGHTALT"),
    (101, "LINEFEED"),
    (102, "HOME"),
    (103, "UP"),
    (104, "PAGEUP"),
    (105, "LEFT"),
    (106, "RIGHT"),
    (107, "END"),
    (108, "DOWN"),
    (109, "PAGEDOWN"),
    (110, "INSERT"),
    (111, "DELETE"),
    (112, "MACRO"),
    (113, "MUTE"),
    (114, "VOLUMEDOWN"),
    (115, "VOLUMEUP"),
    (116, "POWER"),
    (117, "KPEQUAL"),
    (118, "KPPLUSMINUS"),
    (119, "PAUSE"),
    (120, "SCALE"),
    (121, "KPCOMMA"),
    (122, "HANGEUL"),
    (123, "HANJA"),
    (124, "YEN"),
    (125, "LEFTMETA"),
    (126, "RIGHTMETA"),
    (127, "COMPOSE"),
    (128, "STOP"),
    (129, "AGAIN"),
    (130, "PROPS"),
    (131, "UNDO"),
    (132, "FRONT"),
    (133, "COPY"),
    (134, "OPEN"),
    (135, "PASTE"),
    (136, "FIND"),
    (137, "CUT"),
    (138, "HELP"),
    (139, "MENU"),
    (140, "CALC"),
    (141, "SETUP"),
    (142, "SLEEP"),
    (143, "WAKEUP"),
    (144, "FILE"),
    (145, "SENDFILE"),
    (146, "DELETEFILE"),
    (147, "XFER"),
    (148, "PROG1"),
    (149, "PROG2"),
    (150, "WWW"),
    (151, "MSDOS"),
    (152, "COFFEE"),
    (153, "ROTATE_DISPLAY"),
    (154, "CYCLEWINDOWS"),
    (155, "MAIL"),
    (156, "BOOKMARKS"),
    (157, "COMPUTER"),
    (158, "BACK"),
    (159, "FORWARD"),
    (160, "CLOSECD"),
    (161, "EJECTCD"),
    (162, "EJECTCLOSECD"),
    (163, "NEXTSONG"),
    (164, "PLAYPAUSE"),
    (165, "PREVIOUSSONG"),
    (166, "STOPCD"),
    (167, "RECORD"),
    (168, "REWIND"),
    (169, "PHONE"),
    (170, "ISO"),
    (171, "CONFIG"),
    (172, "HOMEPAGE"),
    (173, "REFRESH"),
    (174, "EXIT"),
    (175, "MOVE"),
    (176, "EDIT"),
    (177, "SCROLLUP"),
    (178, "SCROLLDOWN"),
    (179, "KPLEFTPAREN"),
    (180, "KPRIGHTPAREN"),
    (181, "NEW"),
    (182, "REDO"),
    (183, "F13"),
    (184, "F14"),
    (185, "F15"),
    (186, "F16"),
    (187, "F17"),
    (188, "F18"),
    (189, "F19"),
    (190, "F20"),
    (191, "F21"),
    (192, "F22"),
    (193, "F23"),
    (194, "F24"),
    (200, "PLAYCD"),
    (201, "PAUSECD"),
    (202, "PROG3"),
    (203, "PROG4"),
    (204, "ALL_APPLICATIONS"),
    (205, "SUSPEND"),
    (206, "CLOSE"),
    (207, "PLAY"),
    (208, "FASTFORWARD"),
    (209, "BASSBOOST"),
    (210, "PRINT"),
    (211, "HP"),
    (212, "CAMERA"),
    (213, "SOUND"),
    (214, "QUESTION"),
    (215, "EMAIL"),
    (216, "CHAT"),
    (217, "SEARCH"),
    (218, "CONNECT"),
    (219, "FINANCE"),
    (220, "SPORT"),
    (221, "SHOP"),
    (222, "ALTERASE"),
    (223, "CANCEL"),
    (224, "BRIGHTNESSDOWN"),
    (225, "BRIGHTNESSUP"),
    (226, "MEDIA"),
    (227, "SWITCHVIDEOMODE"),
    (228, "KBDILLUMTOGGLE"),
    (229, "KBDILLUMDOWN"),
    (230, "KBDILLUMUP"),
    (231, "SEND"),
    (232, "REPLY"),
    (233, "FORWARDMAIL"),
    (234, "SAVE"),
    (235, "DOCUMENTS"),
    (236, "BATTERY"),
    (237, "BLUETOOTH"),
    (238, "WLAN"),
    (239, "UWB"),
    (240, "UNKNOWN"),
    (241, "VIDEO_NEXT"),
    (242, "VIDEO_PREV"),
    (243, "BRIGHTNESS_CYCLE"),
    (244, "BRIGHTNESS_AUTO"),
    (245, "DISPLAY_OFF"),
    (246, "WWAN"),
    (247, "RFKILL"),
    (248, "MICMUTE"),
    (0x100, "BTN_0"),
    (0x100, "BTN_MISC"),
    (0x101, "BTN_1"),
    (0x102, "BTN_2"),
    (0x103, "BTN_3"),
    (0x104, "BTN_4"),
    (0x105, "BTN_5"),
    (0x106, "BTN_6"),
    (0x107, "BTN_7"),
    (0x108, "BTN_8"),
    (0x109, "BTN_9"),
    (0x110, "BTN_LEFT"),
    (0x110, "BTN_MOUSE"),
    (0x111, "BTN_RIGHT"),
    (0x112, "BTN_MIDDLE"),
    (0x113, "BTN_SIDE"),
    (0x114, "BTN_EXTRA"),
    (0x115, "BTN_FORWARD"),
    (0x116, "BTN_BACK"),
    (0x117, "BTN_TASK"),
    (0x120, "BTN_TRIGGER"),
    (0x120, "BTN_JOYSTICK"),
    (0x121, "BTN_THUMB"),
    (0x122, "BTN_THUMB2"),
    (0x123, "BTN_TOP"),
    (0x124, "BTN_TOP2"),
    (0x125, "BTN_PINKIE"),
    (0x126, "BTN_BASE"),
    (0x127, "BTN_BASE2"),
    (0x128, "BTN_BASE3"),
    (0x129, "BTN_BASE4"),
    (0x12a, "BTN_BASE5"),
    (0x12b, "BTN_BASE6"),
    (0x12f, "BTN_DEAD"),
    (0x130, "BTN_SOUTH"),
    (0x130, "BTN_GAMEPAD"),
    (0x131, "BTN_EAST"),
    (0x132, "BTN_C"),
    (0x133, "BTN_NORTH"),
    (0x134, "BTN_WEST"),
    (0x135, "BTN_Z"),
    (0x136, "BTN_TL"),
    (0x137, "BTN_TR"),
    (0x138, "BTN_TL2"),
    (0x139, "BTN_TR2"),
    (0x13a, "BTN_SELECT"),
    (0x13b, "BTN_START"),
    (0x13c, "BTN_MODE"),
    (0x13d, "BTN_THUMBL"),
    (0x13e, "BTN_THUMBR"),
    (0x140, "BTN_TOOL_PEN"),
    (0x140, "BTN_DIGI"),
    (0x141, "BTN_TOOL_RUBBER"),
    (0x142, "BTN_TOOL_BRUSH"),
    (0x143, "BTN_TOOL_PENCIL"),
    (0x144, "BTN_TOOL_AIRBRUSH"),
    (0x145, "BTN_TOOL_FINGER"),
    (0x146, "BTN_TOOL_MOUSE"),
    (0x147, "BTN_TOOL_LENS"),
    (0x148, "BTN_TOOL_QUINTTAP"),
    (0x149, "BTN_STYLUS3"),
    (0x14a, "BTN_TOUCH"),
    (0x14b, "BTN_STYLUS"),
    (0x14c, "BTN_STYLUS2"),
    (0x14d, "BTN_TOOL_DOUBLETAP"),
    (0x14e, "BTN_TOOL_TRIPLETAP"),
    (0x14f, "BTN_TOOL_QUADTAP"),
    (0x150, "BTN_GEAR_DOWN"),
    (0x150, "BTN_WHEEL"),
    (0x151, "BTN_GEAR_UP"),
    (0x160, "OK"),
    (0x161, "SELECT"),
    (0x162, "GOTO"),
    (0x163, "CLEAR"),
    (0x164, "POWER2"),
    (0x165, "OPTION"),
    (0x166, "INFO"),
    (0x167, "TIME"),
    (0x168, "VENDOR"),
    (0x169, "ARCHIVE"),
    (0x16a, "PROGRAM"),
    (0x16b, "CHANNEL"),
    (0x16c, "FAVORITES"),
    (0x16d, "EPG"),
    (0x16e, "PVR"),
    (0x16f, "MHP"),
    (0x170, "LANGUAGE"),
    (0x171, "TITLE"),
    (0x172, "SUBTITLE"),
    (0x173, "ANGLE"),
    (0x174, "FULL_SCREEN"),
    (0x175, "MODE"),
    (0x176, "KEYBOARD"),
    (0x177, "ASPECT_RATIO"),
    (0x178, "PC"),
    (0x179, "TV"),
    (0x17a, "TV2"),
    (0x17b, "VCR"),
    (0x17c, "VCR2"),
    (0x17d, "SAT"),
    (0x17e, "SAT2"),
    (0x17f, "CD"),
    (0x180, "TAPE"),
    (0x181, "RADIO"),
    (0x182, "TUNER"),
    (0x183, "PLAYER"),
    (0x184, "TEXT"),
    (0x185, "DVD"),
    (0x186, "AUX"),
    (0x187, "MP3"),
    (0x188, "AUDIO"),
    (0x189, "VIDEO"),
    (0x18a, "DIRECTORY"),
    (0x18b, "LIST"),
    (0x18c, "MEMO"),
    (0x18d, "CALENDAR"),
    (0x18e, "RED"),
    (0x18f, "GREEN"),
    (0x190, "YELLOW"),
    (0x191, "BLUE"),
    (0x192, "CHANNELUP"),
    (0x193, "CHANNELDOWN"),
    (0x194, "FIRST"),
    (0x195, "LAST"),
    (0x196, "AB"),
    (0x197, "NEXT"),
    (0x198, "RESTART"),
    (0x199, "SLOW"),
    (0x19a, "SHUFFLE"),
    (0x19b, "BREAK"),
    (0x19c, "PREVIOUS"),
    (0x19d, "DIGITS"),
    (0x19e, "TEEN"),
    (0x19f, "TWEN"),
    (0x1a0, "VIDEOPHONE"),
    (0x1a1, "GAMES"),
    (0x1a2, "ZOOMIN"),
    (0x1a3, "ZOOMOUT"),
    (0x1a4, "ZOOMRESET"),
    (0x1a5, "WORDPROCESSOR"),
    (0x1a6, "EDITOR"),
    (0x1a7, "SPREADSHEET"),
    (0x1a8, "GRAPHICSEDITOR"),
    (0x1a9, "PRESENTATION"),
    (0x1aa, "DATABASE"),
    (0x1ab, "NEWS"),
    (0x1ac, "VOICEMAIL"),
    (0x1ad, "ADDRESSBOOK"),
    (0x1ae, "MESSENGER"),
    (0x1af, "DISPLAYTOGGLE"),
    (0x1b0, "SPELLCHECK"),
    (0x1b1, "LOGOFF"),
    (0x1b2, "DOLLAR"),
    (0x1b3, "EURO"),
    (0x1b4, "FRAMEBACK"),
    (0x1b5, "FRAMEFORWARD"),
    (0x1b6, "CONTEXT_MENU"),
    (0x1b7, "MEDIA_REPEAT"),
    (0x1b8, "10CHANNELSUP"),
    (0x1b9, "10CHANNELSDOWN"),
    (0x1ba, "IMAGES"),
    (0x1bc, "NOTIFICATION_CENTER"),
    (0x1bd, "PICKUP_PHONE"),
    (0x1be, "HANGUP_PHONE"),
    (0x1bf, "LINK_PHONE"),
    (0x1c0, "DEL_EOL"),
    (0x1c1, "DEL_EOS"),
    (0x1c2, "INS_LINE"),
    (0x1c3, "DEL_LINE"),
    (0x1d0, "FN"),
    (0x1d1, "FN_ESC"),
    (0x1d2, "FN_F1"),
    (0x1d3, "FN_F2"),
    (0x1d4, "FN_F3"),
    (0x1d5, "FN_F4"),
    (0x1d6, "FN_F5"),
    (0x1d7, "FN_F6"),
    (0x1d8, "FN_F7"),
    (0x1d9, "FN_F8"),
    (0x1da, "FN_F9"),
    (0x1db, "FN_F10"),
    (0x1dc, "FN_F11"),
    (0x1dd, "FN_F12"),
    (0x1de, "FN_1"),
    (0x1df, "FN_2"),
    (0x1e0, "FN_D"),
    (0x1e1, "FN_E"),
    (0x1e2, "FN_F"),
    (0x1e3, "FN_S"),
    (0x1e4, "FN_B"),
    (0x1e5, "FN_RIGHT_SHIFT"),
    (0x1f1, "BRL_DOT1"),
    (0x1f2, "BRL_DOT2"),
    (0x1f3, "BRL_DOT3"),
    (0x1f4, "BRL_DOT4"),
    (0x1f5, "BRL_DOT5"),
    (0x1f6, "BRL_DOT6"),
    (0x1f7, "BRL_DOT7"),
    (0x1f8, "BRL_DOT8"),
    (0x1f9, "BRL_DOT9"),
    (0x1fa, "BRL_DOT10"),
    (0x200, "NUMERIC_0"),
    (0x201, "NUMERIC_1"),
    (0x202, "NUMERIC_2"),
    (0x203, "NUMERIC_3"),
    (0x204, "NUMERIC_4"),
    (0x205, "NUMERIC_5"),
    (0x206, "NUMERIC_6"),
    (0x207, "NUMERIC_7"),
    (0x208, "NUMERIC_8"),
    (0x209, "NUMERIC_9"),
    (0x20a, "NUMERIC_STAR"),
    (0x20b, "NUMERIC_POUND"),
    (0x20c, "NUMERIC_A"),
    (0x20d, "NUMERIC_B"),
    (0x20e, "NUMERIC_C"),
    (0x20f, "NUMERIC_D"),
    (0x210, "CAMERA_FOCUS"),
    (0x211, "WPS_BUTTON"),
    (0x212, "TOUCHPAD_TOGGLE"),
    (0x213, "TOUCHPAD_ON"),
    (0x214, "TOUCHPAD_OFF"),
    (0x215, "CAMERA_ZOOMIN"),
    (0x216, "CAMERA_ZOOMOUT"),
    (0x217, "CAMERA_UP"),
    (0x218, "CAMERA_DOWN"),
    (0x219, "CAMERA_LEFT"),
    (0x21a, "CAMERA_RIGHT"),
    (0x21b, "ATTENDANT_ON"),
    (0x21c, "ATTENDANT_OFF"),
    (0x21d, "ATTENDANT_TOGGLE"),
    (0x21e, "LIGHTS_TOGGLE"),
    (0x220, "BTN_DPAD_UP"),
    (0x221, "BTN_DPAD_DOWN"),
    (0x222, "BTN_DPAD_LEFT"),
    (0x223, "BTN_DPAD_RIGHT"),
    (0x230, "ALS_TOGGLE"),
    (0x231, "ROTATE_LOCK_TOGGLE"),
    (0x232, "REFRESH_RATE_TOGGLE"),
    (0x240, "BUTTONCONFIG"),
    (0x241, "TASKMANAGER"),
    (0x242, "JOURNAL"),
    (0x243, "CONTROLPANEL"),
    (0x244, "APPSELECT"),
    (0x245, "SCREENSAVER"),
    (0x246, "VOICECOMMAND"),
    (0x247, "ASSISTANT"),
    (0x248, "KBD_LAYOUT_NEXT"),
    (0x249, "EMOJI_PICKER"),
    (0x24a, "DICTATE"),
    (0x250, "BRIGHTNESS_MIN"),
    (0x251, "BRIGHTNESS_MAX"),
    (0x260, "KBDINPUTASSIST_PREV"),
    (0x261, "KBDINPUTASSIST_NEXT"),
    (0x262, "KBDINPUTASSIST_PREVGROUP"),
    (0x263, "KBDINPUTASSIST_NEXTGROUP"),
    (0x264, "KBDINPUTASSIST_ACCEPT"),
    (0x265, "KBDINPUTASSIST_CANCEL"),
    (0x266, "RIGHT_UP"),
    (0x267, "RIGHT_DOWN"),
    (0x268, "LEFT_UP"),
    (0x269, "LEFT_DOWN"),
    (0x26a, "ROOT_MENU"),
    (0x26b, "MEDIA_TOP_MENU"),
    (0x26c, "NUMERIC_11"),
    (0x26d, "NUMERIC_12"),
    (0x26e, "AUDIO_DESC"),
    (0x26f, "3D_MODE"),
    (0x270, "NEXT_FAVORITE"),
    (0x271, "STOP_RECORD"),
    (0x272, "PAUSE_RECORD"),
    (0x273, "VOD"),
    (0x274, "UNMUTE"),
    (0x275, "FASTREVERSE"),
    (0x276, "SLOWREVERSE"),
    (0x277, "DATA"),
    (0x278, "ONSCREEN_KEYBOARD"),
    (0x279, "PRIVACY_SCREEN_TOGGLE"),
    (0x27a, "SELECTIVE_SCREENSHOT"),
    (0x27b, "NEXT_ELEMENT"),
    (0x27c, "PREVIOUS_ELEMENT"),
    (0x27d, "AUTOPILOT_ENGAGE_TOGGLE"),
    (0x27e, "MARK_WAYPOINT"),
    (0x27f, "SOS"),
    (0x280, "NAV_CHART"),
    (0x281, "FISHING_CHART"),
    (0x282, "SINGLE_RANGE_RADAR"),
    (0x283, "DUAL_RANGE_RADAR"),
    (0x284, "RADAR_OVERLAY"),
    (0x285, "TRADITIONAL_SONAR"),
    (0x286, "CLEARVU_SONAR"),
    (0x287, "SIDEVU_SONAR"),
    (0x288, "NAV_INFO"),
    (0x289, "BRIGHTNESS_MENU"),
    (0x290, "MACRO1"),
    (0x291, "MACRO2"),
    (0x292, "MACRO3"),
    (0x293, "MACRO4"),
    (0x294, "MACRO5"),
    (0x295, "MACRO6"),
    (0x296, "MACRO7"),
    (0x297, "MACRO8"),
    (0x298, "MACRO9"),
    (0x299, "MACRO10"),
    (0x29a, "MACRO11"),
    (0x29b, "MACRO12"),
    (0x29c, "MACRO13"),
    (0x29d, "MACRO14"),
    (0x29e, "MACRO15"),
    (0x29f, "MACRO16"),
    (0x2a0, "MACRO17"),
    (0x2a1, "MACRO18"),
    (0x2a2, "MACRO19"),
    (0x2a3, "MACRO20"),
    (0x2a4, "MACRO21"),
    (0x2a5, "MACRO22"),
    (0x2a6, "MACRO23"),
    (0x2a7, "MACRO24"),
    (0x2a8, "MACRO25"),
    (0x2a9, "MACRO26"),
    (0x2aa, "MACRO27"),
    (0x2ab, "MACRO28"),
    (0x2ac, "MACRO29"),
    (0x2ad, "MACRO30"),
    (0x2b0, "MACRO_RECORD_START"),
    (0x2b1, "MACRO_RECORD_STOP"),
    (0x2b2, "MACRO_PRESET_CYCLE"),
    (0x2b3, "MACRO_PRESET1"),
    (0x2b4, "MACRO_PRESET2"),
    (0x2b5, "MACRO_PRESET3"),
    (0x2b8, "KBD_LCD_MENU1"),
    (0x2b9, "KBD_LCD_MENU2"),
    (0x2ba, "KBD_LCD_MENU3"),
    (0x2bb, "KBD_LCD_MENU4"),
    (0x2bc, "KBD_LCD_MENU5"),
    (0x2c0, "BTN_TRIGGER_HAPPY1"),
    (0x2c0, "BTN_TRIGGER_HAPPY"),
    (0x2c1, "BTN_TRIGGER_HAPPY2"),
    (0x2c2, "BTN_TRIGGER_HAPPY3"),
    (0x2c3, "BTN_TRIGGER_HAPPY4"),
    (0x2c4, "BTN_TRIGGER_HAPPY5"),
    (0x2c5, "BTN_TRIGGER_HAPPY6"),
    (0x2c6, "BTN_TRIGGER_HAPPY7"),
    (0x2c7, "BTN_TRIGGER_HAPPY8"),
    (0x2c8, "BTN_TRIGGER_HAPPY9"),
    (0x2c9, "BTN_TRIGGER_HAPPY10"),
    (0x2ca, "BTN_TRIGGER_HAPPY11"),
    (0x2cb, "BTN_TRIGGER_HAPPY12"),
    (0x2cc, "BTN_TRIGGER_HAPPY13"),
    (0x2cd, "BTN_TRIGGER_HAPPY14"),
    (0x2ce, "BTN_TRIGGER_HAPPY15"),
    (0x2cf, "BTN_TRIGGER_HAPPY16"),
    (0x2d0, "BTN_TRIGGER_HAPPY17"),
    (0x2d1, "BTN_TRIGGER_HAPPY18"),
    (0x2d2, "BTN_TRIGGER_HAPPY19"),
    (0x2d3, "BTN_TRIGGER_HAPPY20"),
    (0x2d4, "BTN_TRIGGER_HAPPY21"),
    (0x2d5, "BTN_TRIGGER_HAPPY22"),
    (0x2d6, "BTN_TRIGGER_HAPPY23"),
    (0x2d7, "BTN_TRIGGER_HAPPY24"),
    (0x2d8, "BTN_TRIGGER_HAPPY25"),
    (0x2d9, "BTN_TRIGGER_HAPPY26"),
    (0x2da, "BTN_TRIGGER_HAPPY27"),
    (0x2db, "BTN_TRIGGER_HAPPY28"),
    (0x2dc, "BTN_TRIGGER_HAPPY29"),
    (0x2dd, "BTN_TRIGGER_HAPPY30"),
    (0x2de, "BTN_TRIGGER_HAPPY31"),
    (0x2df, "BTN_TRIGGER_HAPPY32"),
    (0x2e0, "BTN_TRIGGER_HAPPY33"),
    (0x2e1, "BTN_TRIGGER_HAPPY34"),
    (0x2e2, "BTN_TRIGGER_HAPPY35"),
    (0x2e3, "BTN_TRIGGER_HAPPY36"),
    (0x2e4, "BTN_TRIGGER_HAPPY37"),
    (0x2e5, "BTN_TRIGGER_HAPPY38"),
    (0x2e6, "BTN_TRIGGER_HAPPY39"),
    (0x2e7, "BTN_TRIGGER_HAPPY40"),
];

/// Display name for a key code
pub fn key_name(code: u16) -> &'static str {
    KEY_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or("UNKNOWN")
}

// "KEY_LEFT_CTRL", "leftctrl" and "LeftCtrl" all compare equal to "LEFTCTRL".
fn normalize(name: &str) -> String {
    let upper = name.trim().to_ascii_uppercase();
    let bare = upper.strip_prefix("KEY_").unwrap_or(&upper);
    bare.chars().filter(|c| *c != '_').collect()
}

/// Key lookup by name.
///
/// Accepts kernel names with or without the `KEY_` prefix, in any case, with
/// or without underscores, and plain decimal codes below `KEY_CNT`.
pub fn key_from_name(name: &str) -> Option<Key> {
    if let Ok(code) = name.trim().parse::<u16>() {
        // Single digits are key names ("1" is KEY_1), not codes.
        if name.trim().len() > 1 {
            return (usize::from(code) < KEY_CNT).then_some(Key(code));
        }
    }

    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    KEY_NAMES
        .iter()
        .find(|(_, n)| normalize(n) == wanted)
        .map(|(code, _)| Key(*code))
}
