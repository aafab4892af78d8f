//! Parse Linux input_event records from raw bytes.

use evdevil::event::{EventType, InputEvent};

/// struct input_event on 32-bit ARM (timeval 8 + type 2 + code 2 + value 4).
pub const INPUT_EVENT_SIZE_32: usize = 16;
/// struct input_event on 64-bit targets (timeval 16 + type 2 + code 2 + value 4).
pub const INPUT_EVENT_SIZE_64: usize = 24;

pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_ABS: u16 = 0x03;
pub const SYN_REPORT: u16 = 0;

pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_PRESSURE: u16 = 0x18;
pub const ABS_TILT_X: u16 = 0x1a;
pub const ABS_TILT_Y: u16 = 0x1b;

pub const BTN_TOOL_PEN: u16 = 0x140;
pub const BTN_TOOL_RUBBER: u16 = 0x141;
pub const BTN_TOUCH: u16 = 0x14a;
pub const BTN_STYLUS: u16 = 0x14b;
pub const BTN_STYLUS2: u16 = 0x14c;

/// Parse one input_event; the layout is picked from the buffer length.
/// Returns None if the buffer is shorter than the 32-bit layout.
pub fn parse_input_event(buf: &[u8]) -> Option<InputEvent> {
    match buf.len() {
        len if len >= INPUT_EVENT_SIZE_64 => Some(parse_at(buf, 16)),
        len if len >= INPUT_EVENT_SIZE_32 => Some(parse_at(buf, 8)),
        _ => None,
    }
}

fn parse_at(buf: &[u8], offset: usize) -> InputEvent {
    let ty = u16::from_le_bytes([buf[offset], buf[offset + 1]]);
    let code = u16::from_le_bytes([buf[offset + 2], buf[offset + 3]]);
    let value = i32::from_le_bytes([
        buf[offset + 4],
        buf[offset + 5],
        buf[offset + 6],
        buf[offset + 7],
    ]);
    InputEvent::new(EventType::from_raw(ty), code, value)
}
