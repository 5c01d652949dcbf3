use crate::chunk_io::ChunkDeserializationError;
use crate::control::ProtocolControlError;
use crate::handshake::HandshakeError;
use std::io;
use thiserror::Error;

/// Errors that end a server connection.  The connection's stream should be closed after any
/// of these are returned.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Encountered when the handshake could not be completed
    #[error("Handshake failed: {0}")]
    Handshake(#[from] HandshakeError),

    /// Encountered when an error occurs while reading chunks from the incoming byte stream
    #[error("An error occurred reading incoming chunks: {0}")]
    Chunk(#[from] ChunkDeserializationError),

    /// Encountered when a protocol control message could not be applied
    #[error("An error occurred handling a protocol control message: {0}")]
    Control(#[from] ProtocolControlError),

    /// Chunks were requested before the handshake was performed
    #[error("Chunks cannot be read until the handshake has completed")]
    HandshakeNotCompleted,
}

impl ConnectionError {
    /// Returns true if the connection ended because a read or write timed out
    pub fn is_timeout(&self) -> bool {
        match self.io_error() {
            Some(error) => match error.kind() {
                io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => true,
                _ => false,
            },
            None => false,
        }
    }

    /// Returns true if the connection ended because the peer went away
    pub fn is_disconnect(&self) -> bool {
        match self.io_error() {
            Some(error) => match error.kind() {
                io::ErrorKind::UnexpectedEof
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::BrokenPipe => true,
                _ => false,
            },
            None => false,
        }
    }

    fn io_error(&self) -> Option<&io::Error> {
        match self {
            ConnectionError::Handshake(HandshakeError::Io(error)) => Some(error),
            ConnectionError::Chunk(ChunkDeserializationError::Io(error)) => Some(error),
            _ => None,
        }
    }
}
