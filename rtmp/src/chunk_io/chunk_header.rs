use crate::time::RtmpTimestamp;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{self, Read};

const FORMAT_MASK: u8 = 0b1100_0000;
const CSID_MASK: u8 = 0b0011_1111;

/// The chunk type, carried in the top two bits of the basic header.  The type determines
/// which message header fields are present on the wire.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ChunkHeaderFormat {
    Full,                            // Format 0
    TimeDeltaWithoutMessageStreamId, // Format 1
    TimeDeltaOnly,                   // Format 2
    Empty,                           // Format 3
}

impl ChunkHeaderFormat {
    pub fn from_basic_header_byte(byte: u8) -> ChunkHeaderFormat {
        match (byte & FORMAT_MASK) >> 6 {
            0 => ChunkHeaderFormat::Full,
            1 => ChunkHeaderFormat::TimeDeltaWithoutMessageStreamId,
            2 => ChunkHeaderFormat::TimeDeltaOnly,
            _ => ChunkHeaderFormat::Empty,
        }
    }

    /// The numeric `fmt` value of this chunk type
    pub fn id(&self) -> u8 {
        match *self {
            ChunkHeaderFormat::Full => 0,
            ChunkHeaderFormat::TimeDeltaWithoutMessageStreamId => 1,
            ChunkHeaderFormat::TimeDeltaOnly => 2,
            ChunkHeaderFormat::Empty => 3,
        }
    }
}

/// A chunk header with all compressed fields resolved against the previous header of the
/// same chunk stream.
#[derive(PartialEq, Debug, Clone)]
pub struct ChunkHeader {
    pub format: ChunkHeaderFormat,
    pub chunk_stream_id: u32,

    /// The absolute timestamp of the message this chunk belongs to
    pub timestamp: RtmpTimestamp,

    /// The delta applied when a type 3 chunk starts a new message.  For type 0 headers this
    /// is the absolute timestamp itself.
    pub timestamp_delta: u32,

    /// True if the type 0, 1 or 2 header this was derived from used an extended timestamp.
    /// Type 3 chunks carry a 4 byte extended timestamp for as long as this is set.
    pub has_extended_timestamp: bool,

    pub message_length: u32,
    pub message_type_id: u8,
    pub message_stream_id: u32,
}

/// Reads the 1 to 3 byte basic header, returning the chunk type and the chunk stream id
pub fn read_basic_header<R: Read>(reader: &mut R) -> io::Result<(ChunkHeaderFormat, u32)> {
    let first_byte = reader.read_u8()?;
    let format = ChunkHeaderFormat::from_basic_header_byte(first_byte);

    let csid = match first_byte & CSID_MASK {
        0 => reader.read_u8()? as u32 + 64,
        1 => reader.read_u16::<LittleEndian>()? as u32 + 64,
        x => x as u32,
    };

    Ok((format, csid))
}
