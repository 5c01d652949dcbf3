//! A blocking server side RTMP connection for a single peer.
//!
//! The `ServerConnection` owns the peer's stream and drives it through the handshake and then
//! through chunk demultiplexing, applying protocol control messages along the way.  Every other
//! message is raised to the consumer as a `ConnectionEvent::MessageReceived` event.

mod buffered_stream;
mod config;
mod errors;
mod events;


pub use self::config::ConnectionConfig;
pub use self::errors::ConnectionError;
pub use self::events::ConnectionEvent;

use self::buffered_stream::BufferedStream;
use crate::chunk_io::ChunkStreamDemultiplexer;
use crate::control::{
    HandledMessage, ProtocolControlError, ProtocolControlHandler, ProtocolControlState,
};
use crate::handshake::Handshake;
use std::io::{Read, Write};
use tracing::{trace, warn};

/// The server side of a single RTMP connection
pub struct ServerConnection<S: Read + Write> {
    stream: BufferedStream<S>,
    handshake: Handshake,
    demultiplexer: ChunkStreamDemultiplexer,
    control_state: ProtocolControlState,
    control_handler: ProtocolControlHandler,
}

impl<S: Read + Write> ServerConnection<S> {
    /// Creates a new connection around a stream that has not exchanged any bytes yet.
    ///
    /// Timeouts in the config are not applied here since the stream may not be a socket, see
    /// `ConnectionConfig::apply_timeouts()`.
    pub fn new(stream: S, config: ConnectionConfig) -> ServerConnection<S> {
        ServerConnection {
            stream: BufferedStream::new(stream),
            handshake: Handshake::new(),
            demultiplexer: ChunkStreamDemultiplexer::new(),
            control_state: ProtocolControlState::new(),
            control_handler: ProtocolControlHandler::new(config.max_chunk_size_limit),
        }
    }

    /// Performs the server side of the handshake, blocking until it is complete.  This can
    /// only succeed once per connection.
    pub fn perform_handshake(&mut self) -> Result<(), ConnectionError> {
        self.handshake.perform(&mut self.stream)?;
        Ok(())
    }

    pub fn is_handshake_completed(&self) -> bool {
        self.handshake.is_completed()
    }

    /// Blocks until the next complete message has been read and returns the event it
    /// produced.
    ///
    /// Any error returned is fatal to the connection, and the stream should be closed.
    pub fn next_event(&mut self) -> Result<ConnectionEvent, ConnectionError> {
        if !self.handshake.is_completed() {
            return Err(ConnectionError::HandshakeNotCompleted);
        }

        let message = self
            .demultiplexer
            .next_message(&mut self.stream, &self.control_state)?;

        trace!(
            csid = message.chunk_stream_id,
            type_id = message.type_id,
            length = message.data.len(),
            "Message received"
        );

        match self.control_handler.handle(&mut self.control_state, message) {
            Ok(HandledMessage::Passthrough(message)) => {
                Ok(ConnectionEvent::MessageReceived(message))
            }

            Ok(HandledMessage::ChunkSizeChanged {
                previous_size,
                new_size,
            }) => Ok(ConnectionEvent::ChunkSizeChanged {
                previous_size,
                new_size,
            }),

            Err(ProtocolControlError::UnsupportedControl { message }) => {
                warn!(control_message = ?message, "Ignoring unsupported protocol control message");
                Ok(ConnectionEvent::UnsupportedControlMessage(message))
            }

            Err(error) => Err(error.into()),
        }
    }

    /// The protocol control state negotiated with the peer so far
    pub fn control_state(&self) -> &ProtocolControlState {
        &self.control_state
    }

    /// The time value the peer sent during the handshake
    pub fn peer_epoch(&self) -> u32 {
        self.handshake.their_epoch()
    }

    pub fn get_ref(&self) -> &S {
        self.stream.get_ref()
    }
}
