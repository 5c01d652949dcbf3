//! Blocking building blocks for the ingest side of an RTMP server.
//!
//! A connection is driven in two phases.  First the simple (version 3) handshake is performed
//! by the `handshake` module, then the post-handshake byte stream is handed to the
//! `chunk_io::ChunkStreamDemultiplexer`, which turns interleaved RTMP chunks back into complete
//! messages.  Protocol control messages (such as Set Chunk Size) are recognized by the
//! `control` module and applied to the connection's `control::ProtocolControlState`.
//!
//! `connection::ServerConnection` ties all of these together for a single peer.
//!
//! ```no_run
//! # use std::net::TcpListener;
//! # use rml_rtmp_ingest::connection::{ConnectionConfig, ConnectionEvent, ServerConnection};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let listener = TcpListener::bind("0.0.0.0:1935")?;
//! let (stream, _) = listener.accept()?;
//!
//! let mut connection = ServerConnection::new(stream, ConnectionConfig::new());
//! connection.perform_handshake()?;
//!
//! loop {
//!     match connection.next_event()? {
//!         ConnectionEvent::MessageReceived(message) => println!("{:?}", message),
//!         other => println!("{:?}", other),
//!     }
//! }
//! # }
//! ```

#[cfg(test)]
mod test_utils;

pub mod chunk_io;
pub mod connection;
pub mod control;
pub mod handshake;
pub mod messages;
pub mod time;
