use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

use super::ensure_length;
use crate::messages::{type_ids, ControlMessage, MessageDeserializationError};

const RESERVED_BIT_MASK: u32 = 0x8000_0000;

pub fn deserialize(data: &[u8]) -> Result<ControlMessage, MessageDeserializationError> {
    ensure_length(data, type_ids::SET_CHUNK_SIZE, 4)?;

    let mut cursor = Cursor::new(data);
    let size = cursor.read_u32::<BigEndian>()?;

    // The first bit is reserved and must be zero
    if size & RESERVED_BIT_MASK != 0 {
        return Err(MessageDeserializationError::InvalidMessageFormat);
    }

    Ok(ControlMessage::SetChunkSize { size })
}
