//! Destinations for synthesized pointer events.

mod dump;
mod uinput;

pub use self::dump::DumpSink;
pub use self::uinput::UinputSink;

use std::io;

use crate::pointer::PointerEvent;

/// Something that can deliver a pointer event to the host.
pub trait EventSink {
    fn post(&mut self, event: &PointerEvent) -> io::Result<()>;
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn post(&mut self, event: &PointerEvent) -> io::Result<()> {
        (**self).post(event)
    }
}

/// Keeps every posted event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<PointerEvent>,
}

impl RecordingSink {
    pub fn events(&self) -> &[PointerEvent] {
        &self.events
    }

    /// Drain the recorded events.
    pub fn take(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn post(&mut self, event: &PointerEvent) -> io::Result<()> {
        self.events.push(*event);
        Ok(())
    }
}
