//! Post pointer events through a Linux uinput device.

use std::io;

use evdevil::event::{Abs, AbsEvent, InputEvent, Key, KeyEvent, KeyState};
use evdevil::uinput::{AbsSetup, UinputDevice};
use evdevil::{AbsInfo, Bus, InputId, InputProp};

use super::EventSink;
use crate::error::{Error, Result};
use crate::pointer::{Button, EventKind, PointerEvent, ToolType};

const PRESSURE_MAX: i32 = 4095;
const TILT_MAX: i32 = 9000;

// Same position as Button::ALL.
const BUTTON_KEYS: [Key; 5] = [
    Key::BTN_LEFT,
    Key::BTN_RIGHT,
    Key::BTN_MIDDLE,
    Key::BTN_SIDE,
    Key::BTN_EXTRA,
];

fn create_pointer_device(width: i32, height: i32) -> io::Result<UinputDevice> {
    let axes = [
        AbsSetup::new(Abs::X, AbsInfo::new(0, width).with_resolution(100)),
        AbsSetup::new(Abs::Y, AbsInfo::new(0, height).with_resolution(100)),
        AbsSetup::new(Abs::PRESSURE, AbsInfo::new(0, PRESSURE_MAX)),
        AbsSetup::new(Abs::TILT_X, AbsInfo::new(-TILT_MAX, TILT_MAX)),
        AbsSetup::new(Abs::TILT_Y, AbsInfo::new(-TILT_MAX, TILT_MAX)),
    ];

    UinputDevice::builder()?
        .with_input_id(InputId::new(Bus::from_raw(0x06), 0x2d1f, 0x0002, 0))?
        .with_props([InputProp::POINTER])?
        .with_abs_axes(axes)?
        .with_keys([
            Key::BTN_LEFT,
            Key::BTN_RIGHT,
            Key::BTN_MIDDLE,
            Key::BTN_SIDE,
            Key::BTN_EXTRA,
            Key::BTN_TOOL_PEN,
            Key::BTN_TOOL_RUBBER,
        ])?
        .build("reMarkable Pointer")
}

/// A virtual absolute pointer. The device is destroyed when the sink drops.
pub struct UinputSink {
    device: UinputDevice,
    width: i32,
    height: i32,
    tool: Option<ToolType>,
}

impl UinputSink {
    pub fn open(width: i32, height: i32) -> Result<Self> {
        let device = create_pointer_device(width, height).map_err(Error::SinkCreation)?;

        if let Ok(name) = device.sysname() {
            log::info!(
                "Pointer device ready: /sys/devices/virtual/input/{}",
                name.to_string_lossy()
            );
        }

        Ok(Self {
            device,
            width,
            height,
            tool: None,
        })
    }

    fn tool_events(&mut self, tool: ToolType, out: &mut Vec<InputEvent>) {
        if self.tool == Some(tool) {
            return;
        }
        if let Some(previous) = self.tool {
            out.push(KeyEvent::new(tool_key(previous), KeyState::RELEASED).into());
        }
        out.push(KeyEvent::new(tool_key(tool), KeyState::PRESSED).into());
        self.tool = Some(tool);
    }
}

fn tool_key(tool: ToolType) -> Key {
    match tool {
        ToolType::Pen => Key::BTN_TOOL_PEN,
        ToolType::Eraser => Key::BTN_TOOL_RUBBER,
    }
}

fn button_key(button_number: u8) -> Option<Key> {
    Button::try_from(button_number)
        .ok()
        .map(|b| BUTTON_KEYS[b.index() as usize])
}

fn scale(value: f64, max: i32) -> i32 {
    (value * max as f64).round() as i32
}

impl EventSink for UinputSink {
    fn post(&mut self, event: &PointerEvent) -> io::Result<()> {
        let mut events: Vec<InputEvent> = Vec::with_capacity(8);

        let x = (event.location.x.round() as i32).clamp(0, self.width);
        let y = (event.location.y.round() as i32).clamp(0, self.height);
        events.push(AbsEvent::new(Abs::X, x).into());
        events.push(AbsEvent::new(Abs::Y, y).into());

        if event.kind == EventKind::TabletProximity {
            self.tool_events(event.tool, &mut events);
        } else {
            events.push(AbsEvent::new(Abs::PRESSURE, scale(event.pressure, PRESSURE_MAX)).into());
            if let Some((tx, ty)) = event.tilt {
                events.push(AbsEvent::new(Abs::TILT_X, scale(tx, TILT_MAX)).into());
                events.push(AbsEvent::new(Abs::TILT_Y, scale(ty, TILT_MAX)).into());
            }
        }

        let state = if event.kind.is_down() {
            Some(KeyState::PRESSED)
        } else if event.kind.is_up() {
            Some(KeyState::RELEASED)
        } else {
            None
        };
        if let (Some(state), Some(key)) = (state, button_key(event.button_number)) {
            events.push(KeyEvent::new(key, state).into());
        }

        let writer = self.device.writer().write(&events)?;
        writer.finish()?;
        Ok(())
    }
}

impl Drop for UinputSink {
    fn drop(&mut self) {
        log::debug!("Destroying pointer device");
    }
}
