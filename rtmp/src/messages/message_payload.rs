use crate::time::RtmpTimestamp;
use bytes::Bytes;

/// A complete RTMP message, reassembled from one or more chunks on a single chunk stream.
///
/// The payload is handed over as-is; interpreting it (AMF commands, audio and video data, ...)
/// is up to the consumer.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct MessagePayload {
    /// The absolute timestamp of the message
    pub timestamp: RtmpTimestamp,
    pub type_id: u8,
    pub message_stream_id: u32,

    /// The chunk stream the message was received on
    pub chunk_stream_id: u32,
    pub data: Bytes,
}
