use super::chunk_header::ChunkHeader;
use bytes::{Bytes, BytesMut};
use std::io::{self, Read};
use std::mem;

/// Everything remembered about a single chunk stream id between chunks: the last resolved
/// header (used to decompress the next header) and the partially reassembled message.
pub(crate) struct ChunkStreamContext {
    pub previous_header: Option<ChunkHeader>,
    payload: BytesMut,
}

impl ChunkStreamContext {
    pub fn new() -> ChunkStreamContext {
        ChunkStreamContext {
            previous_header: None,
            payload: BytesMut::new(),
        }
    }

    pub fn bytes_accumulated(&self) -> usize {
        self.payload.len()
    }

    /// A message is in progress once at least one of its payload bytes has been received
    /// and it has not been completed yet.
    pub fn is_message_in_progress(&self) -> bool {
        !self.payload.is_empty()
    }

    /// Reads exactly `length` payload bytes from the reader onto the end of the partial message
    pub fn read_payload<R: Read>(&mut self, reader: &mut R, length: usize) -> io::Result<()> {
        let start = self.payload.len();
        self.payload.resize(start + length, 0);
        if let Err(error) = reader.read_exact(&mut self.payload[start..]) {
            self.payload.truncate(start);
            return Err(error);
        }

        Ok(())
    }

    /// Hands over the reassembled payload and resets the reassembly state
    pub fn take_payload(&mut self) -> Bytes {
        mem::replace(&mut self.payload, BytesMut::new()).freeze()
    }
}
