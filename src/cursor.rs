//! Shared record of where the host pointer currently is.
//! Sinks update it after each post; the platform reads it back when a button
//! transition arrives without a fresh position.

use std::io;
use std::sync::{Arc, Mutex};

use crate::pointer::{Point, PointerEvent};
use crate::sink::EventSink;

/// Last pointer state the host was told about.
#[derive(Debug, Default)]
pub struct CursorState {
    pub location: Point,
    /// Host modifier-key flags, as last observed.
    pub modifiers: u64,
}

impl CursorState {
    pub fn shared(location: Point) -> SharedCursor {
        Arc::new(Mutex::new(Self {
            location,
            modifiers: 0,
        }))
    }
}

/// Type alias for the cursor state shared between sink and platform.
pub type SharedCursor = Arc<Mutex<CursorState>>;

/// Sink adapter that records each successfully posted location.
pub struct TrackCursor<S> {
    inner: S,
    cursor: SharedCursor,
}

impl<S> TrackCursor<S> {
    pub fn new(inner: S, cursor: SharedCursor) -> Self {
        Self { inner, cursor }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EventSink> EventSink for TrackCursor<S> {
    fn post(&mut self, event: &PointerEvent) -> io::Result<()> {
        self.inner.post(event)?;
        if let Ok(mut state) = self.cursor.lock() {
            state.location = event.location;
        }
        Ok(())
    }
}
