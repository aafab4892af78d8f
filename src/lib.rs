//! Turn reMarkable pen reports into host pointer events.
//!
//! [`pointer::Synthesizer`] is the core: it tracks button state and click
//! counts, decides between button, drag and move events, and folds tablet
//! pressure, tilt and tool proximity into each event it posts to an
//! [`sink::EventSink`].

pub mod clock;
pub mod config;
pub mod cursor;
pub mod device;
pub mod error;
pub mod input;
pub mod orientation;
pub mod platform;
pub mod pointer;
pub mod sink;

pub use error::{Error, Result};
