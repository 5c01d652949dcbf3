use crate::messages::{ControlMessage, MessagePayload};

/// An event that a server connection can raise
#[derive(Debug, PartialEq, Clone)]
pub enum ConnectionEvent {
    /// A complete message that is not a protocol control message was received.  Decoding it is
    /// up to the consumer.
    MessageReceived(MessagePayload),

    /// The client is changing the maximum size of the RTMP chunks they will be sending
    ChunkSizeChanged { previous_size: u32, new_size: u32 },

    /// The client sent a valid protocol control message that the connection does not act on
    UnsupportedControlMessage(ControlMessage),
}
