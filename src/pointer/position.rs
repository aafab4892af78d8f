//! Pending-position buffer and the absolute/relative positioning modes.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::event::{Point, PointerEvent};

/// Holds at most one unconsumed position between flushes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionBuffer {
    pending: Option<Point>,
}

impl PositionBuffer {
    pub fn queue(&mut self, position: Point) {
        self.pending = Some(position);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<Point> {
        self.pending
    }

    pub fn drain(&mut self) -> Option<Point> {
        self.pending.take()
    }
}

/// How queued positions are written into an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Positioning {
    /// Queued positions are screen locations.
    #[default]
    Absolute,
    /// Queued positions are deltas from the previous location.
    Relative,
}

impl Positioning {
    /// Where the pointer ends up if `pending` is applied at `current`.
    pub fn resolve(&self, current: Point, pending: Point) -> Point {
        match self {
            Positioning::Absolute => pending,
            Positioning::Relative => Point::new(current.x + pending.x, current.y + pending.y),
        }
    }

    pub fn set_pending(&self, event: &mut PointerEvent, pending: Point) {
        event.location = self.resolve(event.location, pending);
        if *self == Positioning::Relative {
            event.delta = pending;
        }
    }

    /// Clear per-event motion once an event has been posted.
    pub fn reset_pending(&self, event: &mut PointerEvent) {
        if *self == Positioning::Relative {
            event.delta = Point::ORIGIN;
        }
    }
}

impl fmt::Display for Positioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Positioning::Absolute => write!(f, "absolute"),
            Positioning::Relative => write!(f, "relative"),
        }
    }
}

impl FromStr for Positioning {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "absolute" | "abs" => Ok(Positioning::Absolute),
            "relative" | "rel" => Ok(Positioning::Relative),
            _ => Err(format!(
                "Invalid positioning '{}'. Valid values: absolute, relative",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_overwrites_and_drains() {
        let mut buffer = PositionBuffer::default();
        assert_eq!(buffer.drain(), None);

        buffer.queue(Point::new(1.0, 2.0));
        buffer.queue(Point::new(3.0, 4.0));
        assert!(buffer.is_pending());
        assert_eq!(buffer.drain(), Some(Point::new(3.0, 4.0)));
        assert!(!buffer.is_pending());
    }

    #[test]
    fn test_absolute_sets_location_only() {
        let mut event = PointerEvent::new(Point::new(50.0, 50.0));
        Positioning::Absolute.set_pending(&mut event, Point::new(10.0, 20.0));
        assert_eq!(event.location, Point::new(10.0, 20.0));
        assert_eq!(event.delta, Point::ORIGIN);
    }

    #[test]
    fn test_relative_accumulates_and_resets_delta() {
        let mut event = PointerEvent::new(Point::new(50.0, 50.0));
        let mode = Positioning::Relative;
        mode.set_pending(&mut event, Point::new(-5.0, 2.0));
        assert_eq!(event.location, Point::new(45.0, 52.0));
        assert_eq!(event.delta, Point::new(-5.0, 2.0));

        mode.reset_pending(&mut event);
        assert_eq!(event.delta, Point::ORIGIN);
        assert_eq!(event.location, Point::new(45.0, 52.0));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Relative".parse::<Positioning>().unwrap(), Positioning::Relative);
        assert!("sideways".parse::<Positioning>().is_err());
    }
}
