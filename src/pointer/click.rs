//! Double-click counting.
//!
//! The tablet has no notion of a click count, so consecutive presses are
//! folded into one sequence here: a press that arrives quickly after the
//! previous one, with the pointer still near where that sequence started,
//! bumps the count instead of starting over.

use std::time::Duration;

use super::event::Point;
use crate::clock::{Clock, Stopwatch};

/// Farthest the pointer may travel from the press position (output units)
/// and still count towards a multi-click.
pub const MOVE_TOLERANCE: f64 = 8.0;

#[derive(Debug, Clone)]
pub struct ClickTracker {
    interval: Duration,
    timer: Stopwatch,
    down_position: Point,
    moved: bool,
    click_state: u32,
}

impl ClickTracker {
    pub fn new(interval: Duration, clock: &dyn Clock) -> Self {
        Self {
            interval,
            timer: Stopwatch::start(clock),
            down_position: Point::ORIGIN,
            moved: false,
            click_state: 0,
        }
    }

    pub fn click_state(&self) -> u32 {
        self.click_state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Note a new pointer position.
    pub fn track(&mut self, position: Point) {
        if position.distance(self.down_position) > MOVE_TOLERANCE {
            self.moved = true;
        }
    }

    fn invalidated(&self, clock: &dyn Clock) -> bool {
        self.moved || self.timer.elapsed(clock) > self.interval
    }

    /// A button went down. `position` is where the event will be posted, if known.
    pub fn on_down(&mut self, position: Option<Point>, clock: &dyn Clock) -> u32 {
        let invalidated = self.invalidated(clock);
        match position {
            Some(at) if self.click_state == 0 || invalidated => {
                self.timer.restart(clock);
                self.down_position = at;
                self.moved = false;
                self.click_state = 1;
            }
            _ => self.click_state += 1,
        }
        self.click_state
    }

    /// A button went up.
    pub fn on_up(&mut self, clock: &dyn Clock) -> u32 {
        if self.invalidated(clock) {
            self.click_state = 0;
        }
        self.click_state
    }

    /// Forget the current sequence; the next press starts at 1.
    pub fn clear(&mut self, clock: &dyn Clock) {
        self.timer.restart(clock);
        self.moved = false;
        self.click_state = 0;
    }
}
