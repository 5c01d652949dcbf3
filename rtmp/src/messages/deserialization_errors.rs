use thiserror::Error;

use std::io;

/// Enumeration that represents the various errors that may occur while trying to
/// decode a protocol control message
#[derive(Debug, Error)]
pub enum MessageDeserializationError {
    /// The payload was not the size required by the message type
    #[error("Message type {type_id} requires a {expected} byte payload but {actual} bytes were received")]
    InvalidMessageLength {
        type_id: u8,
        expected: usize,
        actual: usize,
    },

    /// The bytes contained in the message were not what were expected, and thus
    /// the message could not be parsed.
    #[error("The message was not encoded in an expected format")]
    InvalidMessageFormat,

    /// Failed to read the values from the input buffer
    #[error("An IO error occurred while reading the input: {0}")]
    Io(#[from] io::Error),
}
