//! Print synthesized events instead of posting them (for `rm-pointer dump`).

use std::io::{self, Write};

use super::EventSink;
use crate::pointer::{EventKind, PointerEvent};

pub struct DumpSink<W> {
    out: W,
    count: u64,
}

impl<W: Write> DumpSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, count: 0 }
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl DumpSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

fn describe(event: &PointerEvent) -> String {
    match event.kind {
        EventKind::TabletProximity => format!("PROXIMITY {:?}", event.tool),
        EventKind::Moved => "MOVE".to_string(),
        kind => format!(
            "{:?} button={} clicks={}",
            kind, event.button_number, event.click_state
        ),
    }
}

impl<W: Write> EventSink for DumpSink<W> {
    fn post(&mut self, event: &PointerEvent) -> io::Result<()> {
        self.count += 1;
        write!(
            self.out,
            "{:6}  {:<32}  x={:.1} y={:.1} pressure={:.3}",
            self.count,
            describe(event),
            event.location.x,
            event.location.y,
            event.pressure
        )?;
        if let Some((tx, ty)) = event.tilt {
            write!(self.out, " tilt=({:.2}, {:.2})", tx, ty)?;
        }
        writeln!(self.out, " buttons={:#05b}", event.point_buttons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::Point;

    #[test]
    fn test_writes_one_line_per_event() {
        let mut sink = DumpSink::new(Vec::new());
        let mut event = PointerEvent::new(Point::new(1.0, 2.0));
        sink.post(&event).unwrap();
        event.kind = EventKind::LeftDown;
        event.click_state = 2;
        sink.post(&event).unwrap();

        let text = String::from_utf8(sink.out.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(sink.count(), 2);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("MOVE"));
        assert!(lines[1].contains("LeftDown button=0 clicks=2"));
        assert!(lines[1].contains("x=1.0 y=2.0"));
    }
}
