// Ubermap Input Layer - Event Codes
// Event type and code constants from input-event-codes.h

/// EV_SYN event type code
pub const EV_SYN: u16 = 0x00;
/// EV_KEY event type code
pub const EV_KEY: u16 = 0x01;
/// EV_REL event type code
pub const EV_REL: u16 = 0x02;
/// EV_MSC event type code
pub const EV_MSC: u16 = 0x04;

pub const SYN_REPORT: u16 = 0;
/// The kernel's buffer overflowed; everything up to the next SYN_REPORT is stale.
pub const SYN_DROPPED: u16 = 3;

pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_WHEEL: u16 = 0x08;

/// Check if an event is a key event.
pub fn is_key_event(event_type: u16) -> bool {
    event_type == EV_KEY
}

/// Types that carry no payload for us but are normal on a keyboard stream.
pub fn is_transparent_event(event_type: u16) -> bool {
    matches!(event_type, EV_SYN | EV_MSC)
}

/// Short name for diagnostics
pub fn event_type_name(event_type: u16) -> &'static str {
    match event_type {
        EV_SYN => "SYN",
        EV_KEY => "KEY",
        EV_REL => "REL",
        EV_MSC => "MSC",
        0x03 => "ABS",
        0x05 => "SW",
        0x11 => "LED",
        0x12 => "SND",
        0x14 => "REP",
        _ => "UNKNOWN",
    }
}
