//! Decode reMarkable pen reports into pointer synthesizer calls.

use std::io::{self, Read};

use evdevil::event::InputEvent;

use crate::clock::Clock;
use crate::config::Bindings;
use crate::device::DeviceProfile;
use crate::error::Result;
use crate::orientation::Orientation;
use crate::platform::Platform;
use crate::pointer::{Button, Positioning, Synthesizer};
use crate::sink::EventSink;

use super::event::{
    parse_input_event, ABS_PRESSURE, ABS_TILT_X, ABS_TILT_Y, ABS_X, ABS_Y, BTN_STYLUS,
    BTN_STYLUS2, BTN_TOOL_PEN, BTN_TOOL_RUBBER, BTN_TOUCH, EV_ABS, EV_KEY, EV_SYN, SYN_REPORT,
};

/// Collects the axes of one pen report and applies them on SYN_REPORT.
pub struct PenDecoder {
    profile: &'static DeviceProfile,
    orientation: Orientation,
    positioning: Positioning,
    bindings: Bindings,

    // Raw values received since the last SYN_REPORT
    pending_x: Option<i32>,
    pending_y: Option<i32>,
    pending_tilt_x: Option<i32>,
    pending_tilt_y: Option<i32>,

    // The tablet only resends axes that changed
    last_x: Option<i32>,
    last_y: Option<i32>,
    last_tilt: (i32, i32),
    last_output: Option<(i32, i32)>,

    reports: u64,
}

impl PenDecoder {
    pub fn new(
        profile: &'static DeviceProfile,
        orientation: Orientation,
        positioning: Positioning,
        bindings: Bindings,
    ) -> Self {
        Self {
            profile,
            orientation,
            positioning,
            bindings,
            pending_x: None,
            pending_y: None,
            pending_tilt_x: None,
            pending_tilt_y: None,
            last_x: None,
            last_y: None,
            last_tilt: (0, 0),
            last_output: None,
            reports: 0,
        }
    }

    pub fn reports(&self) -> u64 {
        self.reports
    }

    pub fn handle<S, P, C>(
        &mut self,
        ev: &InputEvent,
        synth: &mut Synthesizer<S, P, C>,
    ) -> Result<()>
    where
        S: EventSink,
        P: Platform,
        C: Clock,
    {
        let ty = ev.event_type().raw();
        let code = ev.raw_code();
        let value = ev.raw_value();

        match ty {
            EV_ABS => self.handle_abs(code, value, synth),
            EV_KEY => self.handle_key(code, value, synth),
            EV_SYN if code == SYN_REPORT => return self.finish_report(synth),
            _ => {}
        }
        Ok(())
    }

    fn handle_abs<S, P, C>(&mut self, code: u16, value: i32, synth: &mut Synthesizer<S, P, C>)
    where
        S: EventSink,
        P: Platform,
        C: Clock,
    {
        match code {
            ABS_X => self.pending_x = Some(value),
            ABS_Y => self.pending_y = Some(value),
            ABS_TILT_X => self.pending_tilt_x = Some(value),
            ABS_TILT_Y => self.pending_tilt_y = Some(value),
            ABS_PRESSURE => {
                let max = self.profile.pen_pressure_max.max(1) as f64;
                synth.set_pressure(Some(value as f64 / max));
            }
            _ => {}
        }
    }

    fn handle_key<S, P, C>(&mut self, code: u16, value: i32, synth: &mut Synthesizer<S, P, C>)
    where
        S: EventSink,
        P: Platform,
        C: Clock,
    {
        // 2 is autorepeat
        if value == 2 {
            return;
        }
        let pressed = value != 0;

        match code {
            BTN_TOOL_PEN | BTN_TOOL_RUBBER if pressed => {
                synth.set_eraser(Some(code == BTN_TOOL_RUBBER));
            }
            BTN_TOOL_PEN | BTN_TOOL_RUBBER => {
                log::debug!("Pen left proximity");
                synth.set_pressure(Some(0.0));
            }
            _ => {
                if let Some(button) = self.binding(code) {
                    if pressed {
                        synth.press(button);
                    } else {
                        synth.release(button);
                    }
                }
            }
        }
    }

    fn binding(&self, code: u16) -> Option<Button> {
        match code {
            BTN_TOUCH => Some(self.bindings.tip),
            BTN_STYLUS => Some(self.bindings.stylus),
            BTN_STYLUS2 => Some(self.bindings.stylus2),
            _ => None,
        }
    }

    fn finish_report<S, P, C>(&mut self, synth: &mut Synthesizer<S, P, C>) -> Result<()>
    where
        S: EventSink,
        P: Platform,
        C: Clock,
    {
        if self.pending_x.is_some() || self.pending_y.is_some() {
            self.last_x = self.pending_x.take().or(self.last_x);
            self.last_y = self.pending_y.take().or(self.last_y);

            if let (Some(x), Some(y)) = (self.last_x, self.last_y) {
                self.queue_output(x, y, synth);
            }
        }

        if self.pending_tilt_x.is_some() || self.pending_tilt_y.is_some() {
            let tx = self.pending_tilt_x.take().unwrap_or(self.last_tilt.0);
            let ty = self.pending_tilt_y.take().unwrap_or(self.last_tilt.1);
            self.last_tilt = (tx, ty);

            let (out_tx, out_ty) = self.orientation.transform_tilt(tx, ty);
            let range = self.profile.pen_tilt_range.max(1) as f64;
            synth.set_tilt(Some((out_tx as f64 / range, out_ty as f64 / range)));
        }

        synth.flush()?;

        if self.reports == 0 {
            log::info!("Pen events flowing");
        }
        self.reports += 1;
        if self.reports.is_multiple_of(500) {
            log::debug!("Pen reports processed: {}", self.reports);
        }
        Ok(())
    }

    fn queue_output<S, P, C>(&mut self, x: i32, y: i32, synth: &mut Synthesizer<S, P, C>)
    where
        S: EventSink,
        P: Platform,
        C: Clock,
    {
        let (out_x, out_y) = self.orientation.transform_pen(
            x.clamp(0, self.profile.pen_x_max),
            y.clamp(0, self.profile.pen_y_max),
            self.profile.pen_x_max,
            self.profile.pen_y_max,
        );

        match (self.positioning, self.last_output) {
            (Positioning::Absolute, _) => synth.queue_position(out_x as f64, out_y as f64),
            (Positioning::Relative, Some((px, py))) => {
                synth.queue_position((out_x - px) as f64, (out_y - py) as f64)
            }
            // First sample only anchors relative motion.
            (Positioning::Relative, None) => {}
        }
        self.last_output = Some((out_x, out_y));
    }
}

/// Feed raw records from `input` until it closes.
///
/// Held buttons are always released before returning, whether the stream
/// ended or failed.
pub fn run_pen<R, S, P, C>(
    input: &mut R,
    decoder: &mut PenDecoder,
    synth: &mut Synthesizer<S, P, C>,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    R: Read,
    S: EventSink,
    P: Platform,
    C: Clock,
{
    let result = forward(input, decoder, synth);
    synth.reset()?;
    result
}

fn forward<R, S, P, C>(
    input: &mut R,
    decoder: &mut PenDecoder,
    synth: &mut Synthesizer<S, P, C>,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    R: Read,
    S: EventSink,
    P: Platform,
    C: Clock,
{
    let mut buf = vec![0u8; decoder.profile.input_event_size];

    loop {
        match input.read_exact(&mut buf) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                log::info!("Pen input closed after {} reports", decoder.reports());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        let Some(ev) = parse_input_event(&buf) else {
            continue;
        };
        decoder.handle(&ev, synth)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::cursor::{CursorState, TrackCursor};
    use crate::device::RM2;
    use crate::input::INPUT_EVENT_SIZE_32;
    use crate::platform::CursorPlatform;
    use crate::pointer::{EventKind, Point, PointerEvent, ToolType};
    use crate::sink::RecordingSink;
    use std::time::Duration;

    type TestSynth = Synthesizer<TrackCursor<RecordingSink>, CursorPlatform, ManualClock>;

    fn setup(positioning: Positioning) -> (PenDecoder, TestSynth, ManualClock) {
        let clock = ManualClock::new();
        let cursor = CursorState::shared(Point::ORIGIN);
        let platform = CursorPlatform::new(Duration::from_millis(500), cursor.clone());
        let sink = TrackCursor::new(RecordingSink::default(), cursor);
        let synth = Synthesizer::new(sink, platform, clock.clone(), positioning);
        let decoder = PenDecoder::new(&RM2, Orientation::LandscapeRight, positioning, Bindings::default());
        (decoder, synth, clock)
    }

    fn record(ty: u16, code: u16, value: i32) -> Vec<u8> {
        let mut buf = vec![0u8; INPUT_EVENT_SIZE_32 - 8];
        buf.extend_from_slice(&ty.to_le_bytes());
        buf.extend_from_slice(&code.to_le_bytes());
        buf.extend_from_slice(&value.to_le_bytes());
        buf
    }

    fn stream(events: &[(u16, u16, i32)]) -> Vec<u8> {
        events
            .iter()
            .flat_map(|&(ty, code, value)| record(ty, code, value))
            .collect()
    }

    fn take(synth: &mut TestSynth) -> Vec<PointerEvent> {
        synth.sink_mut().get_mut().take()
    }

    const SYN: (u16, u16, i32) = (EV_SYN, SYN_REPORT, 0);

    #[test]
    fn test_stroke_becomes_down_drag_up() {
        let (mut decoder, mut synth, _clock) = setup(Positioning::Absolute);
        let bytes = stream(&[
            (EV_KEY, BTN_TOOL_PEN, 1),
            (EV_ABS, ABS_X, 1000),
            (EV_ABS, ABS_Y, 2000),
            SYN,
            (EV_KEY, BTN_TOUCH, 1),
            (EV_ABS, ABS_PRESSURE, 2048),
            SYN,
            (EV_ABS, ABS_X, 1100),
            SYN,
            (EV_KEY, BTN_TOUCH, 0),
            (EV_ABS, ABS_PRESSURE, 0),
            SYN,
        ]);

        run_pen(&mut bytes.as_slice(), &mut decoder, &mut synth).unwrap();

        let events = take(&mut synth);
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::Moved,
                EventKind::LeftDown,
                EventKind::LeftDragged,
                EventKind::LeftUp
            ]
        );
        assert_eq!(events[1].location, Point::new(1000.0, 2000.0));
        assert!((events[1].pressure - 2048.0 / 4095.0).abs() < 1e-9);
        assert_eq!(events[2].location, Point::new(1100.0, 2000.0));
        assert_eq!(decoder.reports(), 4);
    }

    #[test]
    fn test_eraser_and_tilt() {
        let (mut decoder, mut synth, clock) = setup(Positioning::Absolute);
        clock.advance_ms(250);
        let bytes = stream(&[
            (EV_KEY, BTN_TOOL_RUBBER, 1),
            (EV_ABS, ABS_X, 10),
            (EV_ABS, ABS_Y, 10),
            (EV_ABS, ABS_TILT_X, 3200),
            (EV_ABS, ABS_TILT_Y, -6400),
            SYN,
        ]);

        run_pen(&mut bytes.as_slice(), &mut decoder, &mut synth).unwrap();

        let events = take(&mut synth);
        assert_eq!(events[0].kind, EventKind::TabletProximity);
        assert_eq!(events[0].tool, ToolType::Eraser);
        assert_eq!(events[1].kind, EventKind::Moved);
        assert_eq!(events[1].tilt, Some((0.5, 1.0)));
    }

    #[test]
    fn test_stylus_binding() {
        let (mut decoder, mut synth, _clock) = setup(Positioning::Absolute);
        let bytes = stream(&[(EV_KEY, BTN_STYLUS, 1), SYN, (EV_KEY, BTN_STYLUS, 2), SYN]);

        run_pen(&mut bytes.as_slice(), &mut decoder, &mut synth).unwrap();

        let events = take(&mut synth);
        assert_eq!(events[0].kind, EventKind::RightDown);
        // run_pen releases what is still held when input ends
        assert_eq!(events[1].kind, EventKind::RightUp);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_relative_positioning_sends_deltas() {
        let (mut decoder, mut synth, _clock) = setup(Positioning::Relative);
        let bytes = stream(&[
            (EV_ABS, ABS_X, 500),
            (EV_ABS, ABS_Y, 500),
            SYN,
            (EV_ABS, ABS_X, 510),
            (EV_ABS, ABS_Y, 495),
            SYN,
        ]);

        run_pen(&mut bytes.as_slice(), &mut decoder, &mut synth).unwrap();

        let events = take(&mut synth);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].delta, Point::new(10.0, -5.0));
        assert_eq!(events[0].location, Point::new(10.0, -5.0));
    }

    #[test]
    fn test_truncated_stream_ends_cleanly() {
        let (mut decoder, mut synth, _clock) = setup(Positioning::Absolute);
        let mut bytes = stream(&[(EV_KEY, BTN_TOUCH, 1), SYN]);
        bytes.extend_from_slice(&[0u8; 5]);

        assert!(run_pen(&mut bytes.as_slice(), &mut decoder, &mut synth).is_ok());
        assert!(synth.buttons().is_empty());
        let kinds: Vec<_> = take(&mut synth).iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::LeftDown, EventKind::LeftUp]);
    }
}
