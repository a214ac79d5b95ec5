// Ubermap Event Record
// Value-type mirror of the kernel's struct input_event

use std::fmt;

use crate::input::event::{
    event_type_name, EV_KEY, EV_REL, EV_SYN, REL_WHEEL, REL_X, REL_Y, SYN_DROPPED, SYN_REPORT,
};
use crate::key::key_name;

/// Timestamp of an input event (struct timeval).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeVal {
    pub sec: i64,
    pub usec: i64,
}

impl TimeVal {
    pub fn new(sec: i64, usec: i64) -> Self {
        Self { sec, usec }
    }

    pub fn as_millis(&self) -> i64 {
        self.sec * 1000 + self.usec / 1000
    }
}

/// One kernel input event.
///
/// The translator only ever sees these; the evdev crate types stay behind
/// the device layer. Records we synthesize carry a zero timestamp, the kernel
/// stamps them when they pass through uinput.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputRecord {
    pub time: TimeVal,
    pub kind: u16,
    pub code: u16,
    pub value: i32,
}

impl InputRecord {
    pub fn new(kind: u16, code: u16, value: i32) -> Self {
        Self {
            time: TimeVal::default(),
            kind,
            code,
            value,
        }
    }

    pub fn with_time(mut self, time: TimeVal) -> Self {
        self.time = time;
        self
    }

    pub fn key(code: u16, value: i32) -> Self {
        Self::new(EV_KEY, code, value)
    }

    pub fn rel(code: u16, value: i32) -> Self {
        Self::new(EV_REL, code, value)
    }

    /// Frame terminator
    pub fn syn_report() -> Self {
        Self::new(EV_SYN, SYN_REPORT, 0)
    }

    pub fn syn_dropped() -> Self {
        Self::new(EV_SYN, SYN_DROPPED, 0)
    }

    pub fn is_syn_report(&self) -> bool {
        self.kind == EV_SYN && self.code == SYN_REPORT
    }

    pub fn is_syn_dropped(&self) -> bool {
        self.kind == EV_SYN && self.code == SYN_DROPPED
    }

    /// (kind, code, value) without the timestamp.
    pub fn payload(&self) -> (u16, u16, i32) {
        (self.kind, self.code, self.value)
    }
}

fn code_name(kind: u16, code: u16) -> String {
    match (kind, code) {
        (EV_KEY, _) => key_name(code).to_string(),
        (EV_SYN, SYN_REPORT) => "REPORT".to_string(),
        (EV_SYN, SYN_DROPPED) => "DROPPED".to_string(),
        (EV_REL, REL_X) => "X".to_string(),
        (EV_REL, REL_Y) => "Y".to_string(),
        (EV_REL, REL_WHEEL) => "WHEEL".to_string(),
        _ => code.to_string(),
    }
}

impl fmt::Display for InputRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}.{:06} {} {} {}]",
            self.time.sec,
            self.time.usec,
            event_type_name(self.kind),
            code_name(self.kind, self.code),
            self.value
        )
    }
}
