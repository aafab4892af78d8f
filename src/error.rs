use std::io;

use thiserror::Error;

/// Errors surfaced by the pointer synthesizer and its sinks.
#[derive(Error, Debug)]
pub enum Error {
    /// A button index or name outside left/right/middle/back/forward.
    #[error("invalid pointer button: {0}")]
    InvalidButton(String),

    /// The virtual pointer device could not be created. The synthesizer is unusable.
    #[error("failed to create virtual pointer: {0}")]
    SinkCreation(#[source] io::Error),

    /// The sink refused an event.
    #[error("failed to post pointer event: {0}")]
    Post(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
