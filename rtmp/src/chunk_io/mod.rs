//! This module contains the machinery for reading RTMP chunks off of a byte stream and
//! reassembling them into complete RTMP messages.
//!
//! Every byte received after the handshake must go through the same
//! `ChunkStreamDemultiplexer` instance, as chunk headers are compressed against the previous
//! header seen on the same chunk stream id.

mod chunk_header;
mod chunk_stream_context;
mod demultiplexer;
mod deserialization_errors;

pub use self::chunk_header::{ChunkHeader, ChunkHeaderFormat};
pub use self::demultiplexer::ChunkStreamDemultiplexer;
pub use self::deserialization_errors::ChunkDeserializationError;
