//! Pointer event synthesis.
//!
//! A [`Synthesizer`] owns the state of one virtual pointer. The tablet
//! pipeline feeds it button transitions and samples as they are decoded and
//! calls [`Synthesizer::flush`] once per report; each flush decides between
//! discrete button events and a single drag/move event.

mod button;
mod click;
mod event;
mod position;

pub use button::{Button, ButtonSet};
pub use click::{ClickTracker, MOVE_TOLERANCE};
pub use event::{
    point_buttons, sanitize_modifiers, EventKind, EventSubtype, Point, PointerEvent,
    TabletPayload, ToolType, FLAG_NON_COALESCED, FLAG_RESERVED, POINT_BUTTON_LEFT,
    POINT_BUTTON_MIDDLE, POINT_BUTTON_RIGHT,
};
pub use position::{PositionBuffer, Positioning};

use std::time::Duration;

use crate::clock::{Clock, Stopwatch};
use crate::error::Result;
use crate::platform::Platform;
use crate::sink::EventSink;

/// Idle gap after which the tool is announced as entering proximity again.
pub const PROXIMITY_EXPIRY: Duration = Duration::from_millis(200);

pub struct Synthesizer<S, P, C> {
    sink: S,
    platform: P,
    clock: C,
    positioning: Positioning,
    template: PointerEvent,
    positions: PositionBuffer,
    clicks: ClickTracker,
    current: ButtonSet,
    previous: ButtonSet,
    last_button: Button,
    payload: TabletPayload,
    proximity: Stopwatch,
    posted: u64,
}

impl<S: EventSink, P: Platform, C: Clock> Synthesizer<S, P, C> {
    /// Take ownership of an already-open sink. The double-click interval is
    /// read from the platform once, here.
    pub fn new(sink: S, platform: P, clock: C, positioning: Positioning) -> Self {
        let interval = platform.double_click_interval();
        let template = PointerEvent::new(platform.pointer_location());
        let clicks = ClickTracker::new(interval, &clock);
        let proximity = Stopwatch::start(&clock);

        log::debug!(
            "Pointer synthesizer ready ({} positioning, double-click {}ms)",
            positioning,
            interval.as_millis()
        );

        Self {
            sink,
            platform,
            clock,
            positioning,
            template,
            positions: PositionBuffer::default(),
            clicks,
            current: ButtonSet::EMPTY,
            previous: ButtonSet::EMPTY,
            last_button: Button::Left,
            payload: TabletPayload::default(),
            proximity,
            posted: 0,
        }
    }

    pub fn press(&mut self, button: Button) {
        self.ensure_position();
        self.current.insert(button);
    }

    pub fn release(&mut self, button: Button) {
        self.ensure_position();
        self.current.remove(button);
    }

    pub fn queue_position(&mut self, x: f64, y: f64) {
        let pending = Point::new(x, y);
        self.positions.queue(pending);
        self.clicks
            .track(self.positioning.resolve(self.template.location, pending));
    }

    pub fn set_pressure(&mut self, pressure: Option<f64>) {
        self.payload.pressure = pressure.map(|p| p.clamp(0.0, 1.0));
    }

    pub fn set_tilt(&mut self, tilt: Option<(f64, f64)>) {
        self.payload.tilt = tilt.map(|(x, y)| (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0)));
    }

    pub fn set_eraser(&mut self, eraser: Option<bool>) {
        self.payload.eraser = eraser;
    }

    /// Run one decision cycle.
    pub fn flush(&mut self) -> Result<()> {
        let modifiers = self.platform.modifier_flags();

        let expired = self.current.is_empty()
            && self.proximity.elapsed(&self.clock) >= PROXIMITY_EXPIRY;
        self.proximity.restart(&self.clock);

        self.template.subtype = EventSubtype::TabletPoint;
        if expired {
            self.post_proximity(modifiers)?;
            self.template.subtype = EventSubtype::TabletProximity;
        }

        if self.current != self.previous {
            return self.flush_buttons(modifiers);
        }

        let Some(pending) = self.positions.drain() else {
            return Ok(());
        };
        self.positioning.set_pending(&mut self.template, pending);
        self.template.kind = if self.current.is_empty() {
            EventKind::Moved
        } else {
            EventKind::dragged(self.last_button)
        };
        self.post(modifiers)
    }

    /// Release every held button, posting the matching up events.
    ///
    /// Returns how many buttons were released. Presses that were never
    /// flushed are dropped silently since the host never saw them.
    ///
    /// Every held button gets an up event even if an earlier post fails.
    /// Buttons whose up event could not be posted stay held, so a later
    /// reset tries them again; the first error is returned.
    pub fn reset(&mut self) -> Result<usize> {
        let held = self.previous;
        self.current = ButtonSet::EMPTY;
        if held.is_empty() {
            self.clicks.clear(&self.clock);
            return Ok(0);
        }

        self.ensure_position();
        if let Some(pending) = self.positions.drain() {
            self.positioning.set_pending(&mut self.template, pending);
        }
        let modifiers = self.platform.modifier_flags();

        let mut released = 0;
        let mut failure = None;
        for button in held.iter() {
            self.template.kind = EventKind::up(button);
            self.template.button_number = button.index();
            self.template.click_state = self.clicks.on_up(&self.clock);
            self.last_button = button;
            match self.post(modifiers) {
                Ok(()) => {
                    self.previous.remove(button);
                    released += 1;
                }
                Err(e) => {
                    log::warn!("Failed to release {} on reset: {}", button, e);
                    failure.get_or_insert(e);
                }
            }
        }

        self.template.button_number = 0;
        self.clicks.clear(&self.clock);
        log::info!("Released {} held button(s) on reset", released);

        match failure {
            Some(e) => Err(e),
            None => Ok(released),
        }
    }

    /// Release held buttons and hand the sink back for teardown.
    pub fn close(mut self) -> Result<S> {
        self.reset()?;
        log::debug!("Pointer synthesizer closed after {} events", self.posted);
        Ok(self.sink)
    }

    pub fn buttons(&self) -> ButtonSet {
        self.current
    }

    pub fn click_state(&self) -> u32 {
        self.clicks.click_state()
    }

    pub fn pending_position(&self) -> Option<Point> {
        self.positions.peek()
    }

    pub fn location(&self) -> Point {
        self.template.location
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn ensure_position(&mut self) {
        if self.positions.is_pending() {
            return;
        }
        let location = self.platform.pointer_location();
        let pending = match self.positioning {
            Positioning::Absolute => location,
            Positioning::Relative => Point::new(
                location.x - self.template.location.x,
                location.y - self.template.location.y,
            ),
        };
        self.queue_position(pending.x, pending.y);
    }

    fn flush_buttons(&mut self, modifiers: u64) -> Result<()> {
        let pending = self.positions.drain();
        if let Some(pending) = pending {
            self.positioning.set_pending(&mut self.template, pending);
        }
        let down_at = pending.map(|_| self.template.location);

        for button in Button::ALL {
            let held = self.current.contains(button);
            if held == self.previous.contains(button) {
                continue;
            }

            let (kind, click_state) = if held {
                self.previous.insert(button);
                (EventKind::down(button), self.clicks.on_down(down_at, &self.clock))
            } else {
                self.previous.remove(button);
                (EventKind::up(button), self.clicks.on_up(&self.clock))
            };

            self.template.kind = kind;
            self.template.button_number = button.index();
            self.template.click_state = click_state;
            self.last_button = button;
            self.post(modifiers)?;
        }

        if self.current.is_empty() {
            self.template.button_number = 0;
        }
        Ok(())
    }

    fn post_proximity(&mut self, modifiers: u64) -> Result<()> {
        let mut event = self.template;
        if let Some(pending) = self.positions.peek() {
            event.location = self.positioning.resolve(self.template.location, pending);
        }
        event.kind = EventKind::TabletProximity;
        event.subtype = EventSubtype::TabletProximity;
        event.delta = Point::ORIGIN;
        event.apply_payload(&self.payload, self.current, modifiers);

        log::debug!("Tool entering proximity ({:?})", event.tool);
        self.sink.post(&event)?;
        self.posted += 1;
        Ok(())
    }

    fn post(&mut self, modifiers: u64) -> Result<()> {
        self.template
            .apply_payload(&self.payload, self.current, modifiers);
        log::trace!(
            "{:?} button={} clicks={} at ({:.1}, {:.1})",
            self.template.kind,
            self.template.button_number,
            self.template.click_state,
            self.template.location.x,
            self.template.location.y
        );

        let result = self.sink.post(&self.template);
        self.positioning.reset_pending(&mut self.template);
        self.posted += 1;
        result.map_err(Into::into)
    }
}
