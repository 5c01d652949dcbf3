use crate::messages::{ControlMessage, MessageDeserializationError};
use thiserror::Error;

/// Errors raised while applying protocol control messages.
///
/// All of these are fatal to the connection except `UnsupportedControl`, which only reports
/// a control message that was understood but is not acted upon.
#[derive(Debug, Error)]
pub enum ProtocolControlError {
    /// The peer requested a max chunk size of zero or one above the accepted limit
    #[error("Requested an invalid max chunk size of {size}.  Chunk sizes must be between 1 and {limit}")]
    InvalidChunkSize { size: u32, limit: u32 },

    /// Protocol control messages must be sent on chunk stream 2 and message stream 0
    #[error("Control message type {type_id} was received on csid {chunk_stream_id} and message stream {message_stream_id}")]
    MisaddressedControlMessage {
        type_id: u8,
        chunk_stream_id: u32,
        message_stream_id: u32,
    },

    /// The control message payload could not be decoded
    #[error("Invalid control message: {0}")]
    InvalidControlMessage(#[from] MessageDeserializationError),

    /// The control message was decoded and recorded, but the ingest core does not act on it
    #[error("Control message {message:?} is not handled")]
    UnsupportedControl { message: ControlMessage },
}

impl ProtocolControlError {
    /// Returns false for errors where the connection can keep being processed
    pub fn is_fatal(&self) -> bool {
        match *self {
            ProtocolControlError::UnsupportedControl { .. } => false,
            _ => true,
        }
    }
}
