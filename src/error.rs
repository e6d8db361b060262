//! Error types for idt decoding.

use thiserror::Error;

/// Errors that can occur while loading or decoding an `.idt` catalog.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: u64, limit: usize },

    /// A field read would run past the end of the buffer.
    #[error("{field} at offset {offset} needs {needed} bytes, only {available} available")]
    OutOfBounds {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("scan limit exceeded: more than {limit} {what}")]
    LimitExceeded { what: &'static str, limit: usize },

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),
}

pub type Result<T> = std::result::Result<T, Error>;
