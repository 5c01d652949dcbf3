use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

use super::ensure_length;
use crate::messages::{type_ids, ControlMessage, MessageDeserializationError};

pub fn deserialize(data: &[u8]) -> Result<ControlMessage, MessageDeserializationError> {
    ensure_length(data, type_ids::ABORT, 4)?;

    let mut cursor = Cursor::new(data);
    Ok(ControlMessage::Abort {
        chunk_stream_id: cursor.read_u32::<BigEndian>()?,
    })
}

#[cfg(test)]
mod tests {
    use super::deserialize;
    use crate::messages::ControlMessage;

    #[test]
    fn can_deserialize_message() {
        let result = deserialize(&[0, 0, 2, 20]).unwrap();

        assert_eq!(result, ControlMessage::Abort { chunk_stream_id: 532 });
    }
}
