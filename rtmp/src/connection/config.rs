use crate::control::MAX_CHUNK_SIZE_CEILING;
use std::io;
use std::net::TcpStream;
use std::time::Duration;

/// The configuration options that govern how a server connection should operate
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    /// The largest max chunk size a peer may request with a Set Chunk Size message.  Values
    /// above 16 MiB are capped.
    pub max_chunk_size_limit: u32,

    /// How long a blocking read may wait for bytes before the connection is considered dead
    pub read_timeout: Option<Duration>,

    /// How long a blocking write may wait before the connection is considered dead
    pub write_timeout: Option<Duration>,
}

impl ConnectionConfig {
    /// Creates a new connection config with overridable defaults
    pub fn new() -> ConnectionConfig {
        ConnectionConfig {
            max_chunk_size_limit: MAX_CHUNK_SIZE_CEILING,
            read_timeout: Some(Duration::from_secs(30)),
            write_timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Applies the configured timeouts to a TCP socket.  An expired timeout surfaces as an
    /// I/O error from the read or write that was waiting.
    pub fn apply_timeouts(&self, stream: &TcpStream) -> io::Result<()> {
        stream.set_read_timeout(self.read_timeout)?;
        stream.set_write_timeout(self.write_timeout)?;
        Ok(())
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig::new()
    }
}
