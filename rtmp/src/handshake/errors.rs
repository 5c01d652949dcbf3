use std::io;
use thiserror::Error;

/// An enumeration defining all the possible errors that could occur while performing the
/// RTMP handshake with a peer.
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// The first byte of the handshake (C0) carries the RTMP version the peer wants to use.
    /// Only version 3 (plain RTMP) is supported.
    #[error("First byte of the handshake was {version}, only RTMP version 3 is supported")]
    BadVersionId { version: u8 },

    /// The second time field of C1 is required to be all zeros for the simple handshake
    #[error("Packet 1's second time field was expected to be zero, but was {value:#010x}")]
    NonZeroedTimeInPacket1 { value: u32 },

    /// The handshake was already completed and cannot be performed again
    #[error("The handshake has already been completed")]
    HandshakeAlreadyCompleted,

    /// A read or write on the underlying stream failed, including the peer disconnecting or
    /// a read timing out before a full packet arrived.
    #[error("An I/O error occurred during the handshake: {0}")]
    Io(#[from] io::Error),
}
