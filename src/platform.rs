//! Host settings the synthesizer consults.

use std::time::Duration;

use crate::cursor::SharedCursor;
use crate::pointer::Point;

pub trait Platform {
    /// Longest gap between presses that still counts as a multi-click.
    fn double_click_interval(&self) -> Duration;

    /// Where the host pointer is right now.
    fn pointer_location(&self) -> Point;

    /// Current host modifier-key flags.
    fn modifier_flags(&self) -> u64 {
        0
    }
}

/// Platform backed by a configured interval and the shared cursor record.
#[derive(Debug, Clone)]
pub struct CursorPlatform {
    double_click_interval: Duration,
    cursor: SharedCursor,
}

impl CursorPlatform {
    pub fn new(double_click_interval: Duration, cursor: SharedCursor) -> Self {
        Self {
            double_click_interval,
            cursor,
        }
    }
}

impl Platform for CursorPlatform {
    fn double_click_interval(&self) -> Duration {
        self.double_click_interval
    }

    fn pointer_location(&self) -> Point {
        let Ok(state) = self.cursor.lock() else {
            return Point::ORIGIN;
        };
        state.location
    }

    fn modifier_flags(&self) -> u64 {
        let Ok(state) = self.cursor.lock() else { return 0 };
        state.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::CursorState;

    #[test]
    fn test_reads_shared_cursor() {
        let cursor = CursorState::shared(Point::new(3.0, 4.0));
        let platform = CursorPlatform::new(Duration::from_millis(400), cursor.clone());
        assert_eq!(platform.pointer_location(), Point::new(3.0, 4.0));

        if let Ok(mut state) = cursor.lock() {
            state.location = Point::new(8.0, 9.0);
            state.modifiers = 0x2000_0101;
        }
        assert_eq!(platform.pointer_location(), Point::new(8.0, 9.0));
        assert_eq!(platform.modifier_flags(), 0x2000_0101);
        assert_eq!(platform.double_click_interval(), Duration::from_millis(400));
    }
}
