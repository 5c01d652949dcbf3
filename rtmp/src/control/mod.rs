//! Connection scoped protocol control state, and the handling of the protocol control
//! messages that modify it.
//!
//! Protocol control messages (Set Chunk Size, Abort, Acknowledgement, Window Acknowledgement
//! Size and Set Peer Bandwidth) are intercepted before messages are handed to consumers.  Only
//! Set Chunk Size changes how the rest of the stream is read; the others are decoded, validated
//! and recorded for informational purposes.

mod errors;

pub use self::errors::ProtocolControlError;

use crate::messages::{ControlMessage, MessagePayload, PeerBandwidthLimitType};
use tracing::debug;

/// The max chunk size every RTMP connection starts out with
pub const DEFAULT_MAX_CHUNK_SIZE: u32 = 128;

/// The largest max chunk size that will ever be accepted from a peer (16 MiB)
pub const MAX_CHUNK_SIZE_CEILING: u32 = 16 * 1024 * 1024;

/// The chunk stream id protocol control messages are sent on
pub const CONTROL_CHUNK_STREAM_ID: u32 = 2;

/// The message stream id protocol control messages are sent on
pub const CONTROL_MESSAGE_STREAM_ID: u32 = 0;

/// Mutable protocol state for a single connection.  The demultiplexer consults the max chunk
/// size on every chunk it reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolControlState {
    max_chunk_size: u32,
    last_acknowledgement: Option<u32>,
    window_acknowledgement_size: Option<u32>,
    peer_bandwidth: Option<(u32, PeerBandwidthLimitType)>,
}

impl ProtocolControlState {
    pub fn new() -> ProtocolControlState {
        ProtocolControlState {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            last_acknowledgement: None,
            window_acknowledgement_size: None,
            peer_bandwidth: None,
        }
    }

    /// Returns the maximum size of the payload of any RTMP chunk the peer will send
    pub fn max_chunk_size(&self) -> u32 {
        self.max_chunk_size
    }

    /// Changes the max chunk size expected on subsequent chunks.  Sizes of zero or above
    /// `MAX_CHUNK_SIZE_CEILING` are rejected.
    pub fn set_max_chunk_size(&mut self, size: u32) -> Result<(), ProtocolControlError> {
        if size == 0 || size > MAX_CHUNK_SIZE_CEILING {
            return Err(ProtocolControlError::InvalidChunkSize {
                size,
                limit: MAX_CHUNK_SIZE_CEILING,
            });
        }

        self.max_chunk_size = size;
        Ok(())
    }

    /// The sequence number of the last acknowledgement the peer sent
    pub fn last_acknowledgement(&self) -> Option<u32> {
        self.last_acknowledgement
    }

    /// The acknowledgement window the peer announced
    pub fn window_acknowledgement_size(&self) -> Option<u32> {
        self.window_acknowledgement_size
    }

    /// The bandwidth limit the peer requested
    pub fn peer_bandwidth(&self) -> Option<(u32, PeerBandwidthLimitType)> {
        self.peer_bandwidth
    }
}

impl Default for ProtocolControlState {
    fn default() -> Self {
        ProtocolControlState::new()
    }
}

/// What happened to a message that went through the `ProtocolControlHandler`
#[derive(Debug, PartialEq, Clone)]
pub enum HandledMessage {
    /// The message is not a protocol control message and should be passed on to consumers
    Passthrough(MessagePayload),

    /// The peer changed the max chunk size of the chunks it sends
    ChunkSizeChanged { previous_size: u32, new_size: u32 },
}

/// Intercepts protocol control messages and applies them to the connection's
/// `ProtocolControlState`.
#[derive(Debug, Clone)]
pub struct ProtocolControlHandler {
    max_chunk_size_limit: u32,
}

impl ProtocolControlHandler {
    /// Creates a handler that accepts max chunk sizes up to `max_chunk_size_limit`.  The limit
    /// is capped at `MAX_CHUNK_SIZE_CEILING`.
    pub fn new(max_chunk_size_limit: u32) -> ProtocolControlHandler {
        ProtocolControlHandler {
            max_chunk_size_limit: max_chunk_size_limit.min(MAX_CHUNK_SIZE_CEILING),
        }
    }

    /// Inspects a completed message.  Protocol control messages are applied to the state and
    /// consumed, every other message is passed through untouched.
    ///
    /// Control messages other than Set Chunk Size are recorded in the state and then reported
    /// back as a non-fatal `ProtocolControlError::UnsupportedControl`.
    pub fn handle(
        &self,
        state: &mut ProtocolControlState,
        message: MessagePayload,
    ) -> Result<HandledMessage, ProtocolControlError> {
        if !ControlMessage::is_control_type_id(message.type_id) {
            return Ok(HandledMessage::Passthrough(message));
        }

        if message.chunk_stream_id != CONTROL_CHUNK_STREAM_ID
            || message.message_stream_id != CONTROL_MESSAGE_STREAM_ID
        {
            return Err(ProtocolControlError::MisaddressedControlMessage {
                type_id: message.type_id,
                chunk_stream_id: message.chunk_stream_id,
                message_stream_id: message.message_stream_id,
            });
        }

        let control_message = match ControlMessage::from_payload(&message)? {
            Some(control_message) => control_message,
            None => return Ok(HandledMessage::Passthrough(message)),
        };

        match control_message {
            ControlMessage::SetChunkSize { size } => {
                if size > self.max_chunk_size_limit {
                    return Err(ProtocolControlError::InvalidChunkSize {
                        size,
                        limit: self.max_chunk_size_limit,
                    });
                }

                let previous_size = state.max_chunk_size();
                state.set_max_chunk_size(size)?;
                debug!(previous_size, new_size = size, "Peer changed max chunk size");

                Ok(HandledMessage::ChunkSizeChanged {
                    previous_size,
                    new_size: size,
                })
            }

            ControlMessage::Acknowledgement { sequence_number } => {
                state.last_acknowledgement = Some(sequence_number);
                Err(ProtocolControlError::UnsupportedControl {
                    message: control_message,
                })
            }

            ControlMessage::WindowAcknowledgement { size } => {
                state.window_acknowledgement_size = Some(size);
                Err(ProtocolControlError::UnsupportedControl {
                    message: control_message,
                })
            }

            ControlMessage::SetPeerBandwidth { size, limit_type } => {
                state.peer_bandwidth = Some((size, limit_type));
                Err(ProtocolControlError::UnsupportedControl {
                    message: control_message,
                })
            }

            ControlMessage::Abort { .. } => Err(ProtocolControlError::UnsupportedControl {
                message: control_message,
            }),
        }
    }
}

impl Default for ProtocolControlHandler {
    fn default() -> Self {
        ProtocolControlHandler::new(MAX_CHUNK_SIZE_CEILING)
    }
}
