/*!
This module contains the reassembled RTMP message (`MessagePayload`) handed to consumers, and
the decoding of the protocol control messages the ingest core acts upon.

Decoding of every other message type (commands, audio, video, ...) is left to consumers.
*/

mod deserialization_errors;
mod message_payload;
mod types;

pub use self::deserialization_errors::MessageDeserializationError;
pub use self::message_payload::MessagePayload;

/// Message type ids reserved for protocol control messages
pub mod type_ids {
    pub const SET_CHUNK_SIZE: u8 = 1;
    pub const ABORT: u8 = 2;
    pub const ACKNOWLEDGEMENT: u8 = 3;
    pub const WINDOW_ACKNOWLEDGEMENT_SIZE: u8 = 5;
    pub const SET_PEER_BANDWIDTH: u8 = 6;
}

/// The type of bandwidth limiting that is being requested
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum PeerBandwidthLimitType {
    /// Peer should limit its output bandwidth to the indicated window size
    Hard,

    /// The peer should limit it's output bandwidth to the window indicated or the limit
    /// already in effect, whichever is smaller.
    Soft,

    /// If we previously had a hard limit, this limit should be treated as hard.  Otherwise ignore.
    Dynamic,
}

/// The protocol control messages a peer can send.  These are always sent on chunk stream 2
/// and message stream 0.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ControlMessage {
    /// Tells the peer that the maximum chunk size for RTMP chunks it will be sending is changing
    /// to the specified size.
    SetChunkSize { size: u32 },

    /// Notifies the peer that if it is waiting for chunks to complete a message that it should
    /// discard the chunks it has already received.
    Abort { chunk_stream_id: u32 },

    /// An acknowledgement sent to confirm how many bytes that has been received since the
    /// previous acknowledgement.
    Acknowledgement { sequence_number: u32 },

    /// Notifies the peer how many bytes should be received before sending an `Acknowledgement`
    WindowAcknowledgement { size: u32 },

    /// Indicates that the peer should limit its output bandwidth
    SetPeerBandwidth {
        size: u32,
        limit_type: PeerBandwidthLimitType,
    },
}

impl ControlMessage {
    /// Returns true if the type id is in the range reserved for protocol control messages
    pub fn is_control_type_id(type_id: u8) -> bool {
        match type_id {
            type_ids::SET_CHUNK_SIZE
            | type_ids::ABORT
            | type_ids::ACKNOWLEDGEMENT
            | type_ids::WINDOW_ACKNOWLEDGEMENT_SIZE
            | type_ids::SET_PEER_BANDWIDTH => true,
            _ => false,
        }
    }

    /// Decodes the payload as a protocol control message.  `None` is returned for message
    /// types that are not protocol control messages.
    pub fn from_payload(
        payload: &MessagePayload,
    ) -> Result<Option<ControlMessage>, MessageDeserializationError> {
        let data = &payload.data[..];
        let message = match payload.type_id {
            type_ids::SET_CHUNK_SIZE => types::set_chunk_size::deserialize(data)?,
            type_ids::ABORT => types::abort::deserialize(data)?,
            type_ids::ACKNOWLEDGEMENT => types::acknowledgement::deserialize(data)?,
            type_ids::WINDOW_ACKNOWLEDGEMENT_SIZE => {
                types::window_acknowledgement_size::deserialize(data)?
            }
            type_ids::SET_PEER_BANDWIDTH => types::set_peer_bandwidth::deserialize(data)?,
            _ => return Ok(None),
        };

        Ok(Some(message))
    }

    pub fn get_message_type_id(&self) -> u8 {
        match *self {
            ControlMessage::SetChunkSize { .. } => type_ids::SET_CHUNK_SIZE,
            ControlMessage::Abort { .. } => type_ids::ABORT,
            ControlMessage::Acknowledgement { .. } => type_ids::ACKNOWLEDGEMENT,
            ControlMessage::WindowAcknowledgement { .. } => type_ids::WINDOW_ACKNOWLEDGEMENT_SIZE,
            ControlMessage::SetPeerBandwidth { .. } => type_ids::SET_PEER_BANDWIDTH,
        }
    }
}
