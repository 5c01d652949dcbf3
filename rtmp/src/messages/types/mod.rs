pub mod abort;
pub mod acknowledgement;
pub mod set_chunk_size;
pub mod set_peer_bandwidth;
pub mod window_acknowledgement_size;

use crate::messages::MessageDeserializationError;

fn ensure_length(
    data: &[u8],
    type_id: u8,
    expected: usize,
) -> Result<(), MessageDeserializationError> {
    if data.len() != expected {
        return Err(MessageDeserializationError::InvalidMessageLength {
            type_id,
            expected,
            actual: data.len(),
        });
    }

    Ok(())
}
