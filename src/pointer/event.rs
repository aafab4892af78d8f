//! The outgoing pointer event record and the tablet payload folded into it.

use super::button::{Button, ButtonSet};

/// A location (or delta) in output coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    OtherDown,
    OtherUp,
    LeftDragged,
    RightDragged,
    OtherDragged,
    Moved,
    /// Standalone tool-proximity event.
    TabletProximity,
}

impl EventKind {
    pub fn down(button: Button) -> Self {
        match button {
            Button::Left => EventKind::LeftDown,
            Button::Right => EventKind::RightDown,
            _ => EventKind::OtherDown,
        }
    }

    pub fn up(button: Button) -> Self {
        match button {
            Button::Left => EventKind::LeftUp,
            Button::Right => EventKind::RightUp,
            _ => EventKind::OtherUp,
        }
    }

    pub fn dragged(button: Button) -> Self {
        match button {
            Button::Left => EventKind::LeftDragged,
            Button::Right => EventKind::RightDragged,
            _ => EventKind::OtherDragged,
        }
    }

    pub fn is_down(self) -> bool {
        matches!(self, EventKind::LeftDown | EventKind::RightDown | EventKind::OtherDown)
    }

    pub fn is_up(self) -> bool {
        matches!(self, EventKind::LeftUp | EventKind::RightUp | EventKind::OtherUp)
    }

    pub fn is_drag(self) -> bool {
        matches!(
            self,
            EventKind::LeftDragged | EventKind::RightDragged | EventKind::OtherDragged
        )
    }
}

/// Which tablet record accompanies a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventSubtype {
    #[default]
    TabletPoint,
    TabletProximity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolType {
    #[default]
    Pen,
    Eraser,
}

/// Tablet-specific state that rides along with every event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TabletPayload {
    /// Normalized 0.0..=1.0. `None` is reported as full pressure.
    pub pressure: Option<f64>,
    /// Normalized -1.0..=1.0 per axis, as read from the tablet.
    pub tilt: Option<(f64, f64)>,
    /// `None` when the tablet never said which end is in use.
    pub eraser: Option<bool>,
}

impl TabletPayload {
    pub fn pressure(&self) -> f64 {
        self.pressure.unwrap_or(1.0)
    }

    // A tablet that never reports the eraser is treated as a pen.
    pub fn tool(&self) -> ToolType {
        match self.eraser {
            Some(true) => ToolType::Eraser,
            _ => ToolType::Pen,
        }
    }
}

/// Point-button bit for the left button.
pub const POINT_BUTTON_LEFT: u32 = 1 << 0;
pub const POINT_BUTTON_RIGHT: u32 = 1 << 1;
pub const POINT_BUTTON_MIDDLE: u32 = 1 << 2;

/// Modifier bit flagging an event as non-coalesced.
pub const FLAG_NON_COALESCED: u64 = 0x0000_0100;
/// Reserved modifier bit some hosts leave set in the current flag state.
pub const FLAG_RESERVED: u64 = 0x2000_0000;

/// Legacy tablet point-button mask: at most one of left, right, middle, in that priority.
pub fn point_buttons(held: ButtonSet) -> u32 {
    if held.contains(Button::Left) {
        POINT_BUTTON_LEFT
    } else if held.contains(Button::Right) {
        POINT_BUTTON_RIGHT
    } else if held.contains(Button::Middle) {
        POINT_BUTTON_MIDDLE
    } else {
        0
    }
}

pub fn sanitize_modifiers(flags: u64) -> u64 {
    flags & !(FLAG_NON_COALESCED | FLAG_RESERVED)
}

/// One synthesized pointer event, as handed to an `EventSink`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: EventKind,
    pub subtype: EventSubtype,
    pub location: Point,
    /// Motion since the previous event; only populated for relative positioning.
    pub delta: Point,
    /// Index of the button the event refers to; 0 when idle.
    pub button_number: u8,
    pub click_state: u32,
    pub pressure: f64,
    /// Already in host convention (vertical axis negated).
    pub tilt: Option<(f64, f64)>,
    pub point_buttons: u32,
    pub modifier_flags: u64,
    pub tool: ToolType,
}

impl PointerEvent {
    pub fn new(location: Point) -> Self {
        Self {
            kind: EventKind::Moved,
            subtype: EventSubtype::TabletPoint,
            location,
            delta: Point::ORIGIN,
            button_number: 0,
            click_state: 0,
            pressure: 1.0,
            tilt: None,
            point_buttons: 0,
            modifier_flags: 0,
            tool: ToolType::Pen,
        }
    }

    /// Fold the tablet payload and host flags into this event.
    pub fn apply_payload(&mut self, payload: &TabletPayload, held: ButtonSet, modifiers: u64) {
        self.point_buttons = point_buttons(held);
        self.pressure = payload.pressure();
        if let Some((x, y)) = payload.tilt {
            self.tilt = Some((x, -y));
        }
        self.tool = payload.tool();
        self.modifier_flags = sanitize_modifiers(modifiers);
    }
}
