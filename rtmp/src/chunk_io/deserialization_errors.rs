use std::io;
use thiserror::Error;

/// An enumeration defining all the possible errors that could occur while reading RTMP
/// chunks.  All of them are fatal to the connection, as the framing state cannot be recovered
/// once the chunk stream is out of sync.
#[derive(Debug, Error)]
pub enum ChunkDeserializationError {
    /// The RTMP chunk format requires that RTMP chunks that are not type 0 utilize information
    /// from the previously received chunk on that same chunk stream id.  This error occurs when a
    /// non-0 chunk is received on a stream that has not received a type 0 chunk yet.
    #[error(
        "Received chunk with non-zero chunk type on csid {csid} prior to receiving a type 0 chunk"
    )]
    NoPreviousChunkOnStream { csid: u32 },

    /// Only type 3 chunks may continue a message that has not been fully received yet.  A
    /// chunk carrying a new message header on the same chunk stream id means the peer
    /// abandoned the message without an Abort.
    #[error(
        "Received a type {format} chunk on csid {csid} while {bytes_remaining} bytes of the previous message were still expected"
    )]
    MessageInterrupted {
        csid: u32,
        format: u8,
        bytes_remaining: usize,
    },

    /// An I/O error occurred while reading from the stream, including the stream ending in
    /// the middle of a chunk.
    #[error("{0}")]
    Io(#[from] io::Error),
}
