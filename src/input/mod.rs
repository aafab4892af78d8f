mod event;
mod pen;

pub use event::{parse_input_event, INPUT_EVENT_SIZE_32, INPUT_EVENT_SIZE_64};
pub use pen::{run_pen, PenDecoder};
