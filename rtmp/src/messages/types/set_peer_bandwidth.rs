use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

use super::ensure_length;
use crate::messages::{type_ids, ControlMessage, MessageDeserializationError};
use crate::messages::PeerBandwidthLimitType;

pub fn deserialize(data: &[u8]) -> Result<ControlMessage, MessageDeserializationError> {
    ensure_length(data, type_ids::SET_PEER_BANDWIDTH, 5)?;

    let mut cursor = Cursor::new(data);
    let size = cursor.read_u32::<BigEndian>()?;
    let limit_type = match cursor.read_u8()? {
        0 => PeerBandwidthLimitType::Hard,
        1 => PeerBandwidthLimitType::Soft,
        2 => PeerBandwidthLimitType::Dynamic,
        _ => return Err(MessageDeserializationError::InvalidMessageFormat),
    };

    Ok(ControlMessage::SetPeerBandwidth { size, limit_type })
}
