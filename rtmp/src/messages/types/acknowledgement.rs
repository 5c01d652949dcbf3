use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

use super::ensure_length;
use crate::messages::{type_ids, ControlMessage, MessageDeserializationError};

pub fn deserialize(data: &[u8]) -> Result<ControlMessage, MessageDeserializationError> {
    ensure_length(data, type_ids::ACKNOWLEDGEMENT, 4)?;

    let mut cursor = Cursor::new(data);
    Ok(ControlMessage::Acknowledgement {
        sequence_number: cursor.read_u32::<BigEndian>()?,
    })
}
