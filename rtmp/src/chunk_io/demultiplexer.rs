use super::chunk_header::{read_basic_header, ChunkHeader, ChunkHeaderFormat};
use super::chunk_stream_context::ChunkStreamContext;
use super::ChunkDeserializationError;
use crate::control::ProtocolControlState;
use crate::messages::MessagePayload;
use crate::time::RtmpTimestamp;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::cmp::min;
use std::collections::HashMap;
use std::io::Read;
use tracing::trace;

const MAX_TIMESTAMP_FIELD: u32 = 0xFFFFFF;

/// Reads RTMP chunks off of a blocking byte stream and reassembles them into RTMP messages.
///
/// Chunks of different chunk stream ids may be interleaved on the wire, so the demultiplexer
/// keeps one context per chunk stream id it has seen.  Contexts are never removed, as a later
/// chunk on the same id may compress its header against the last one seen.
///
/// Due to the nature of the RTMP chunk protocol it is required that every byte after the
/// handshake is read through the same `ChunkStreamDemultiplexer` instance.
pub struct ChunkStreamDemultiplexer {
    contexts: HashMap<u32, ChunkStreamContext>,
}

impl ChunkStreamDemultiplexer {
    pub fn new() -> ChunkStreamDemultiplexer {
        ChunkStreamDemultiplexer {
            contexts: HashMap::new(),
        }
    }

    /// Reads chunks until one RTMP message has been fully received and returns it.
    ///
    /// Chunks belonging to other chunk stream ids that are read along the way are buffered in
    /// their own contexts, and will be returned by later calls once they complete.
    ///
    /// The max chunk size is read from `control_state` on every chunk, so if the peer sends a
    /// Set Chunk Size message it must be applied to the state before the next call.  Otherwise
    /// payload boundaries will be misread and the stream will fall out of sync.
    ///
    /// ## Examples
    ///
    /// ```
    /// # use rml_rtmp_ingest::chunk_io::ChunkStreamDemultiplexer;
    /// # use rml_rtmp_ingest::control::ProtocolControlState;
    /// # use std::io::Cursor;
    /// // Type 0 chunk on csid 3: timestamp 10, length 2, type 8, message stream 1
    /// let bytes = vec![0x03, 0, 0, 10, 0, 0, 2, 8, 1, 0, 0, 0, 0xaa, 0xbb];
    ///
    /// let mut demultiplexer = ChunkStreamDemultiplexer::new();
    /// let message = demultiplexer
    ///     .next_message(&mut Cursor::new(bytes), &ProtocolControlState::new())
    ///     .unwrap();
    ///
    /// assert_eq!(message.chunk_stream_id, 3);
    /// assert_eq!(message.type_id, 8);
    /// assert_eq!(message.message_stream_id, 1);
    /// assert_eq!(message.timestamp, 10);
    /// assert_eq!(&message.data[..], &[0xaa, 0xbb]);
    /// ```
    pub fn next_message<R: Read>(
        &mut self,
        reader: &mut R,
        control_state: &ProtocolControlState,
    ) -> Result<MessagePayload, ChunkDeserializationError> {
        loop {
            let max_chunk_size = control_state.max_chunk_size() as usize;
            if let Some(message) = self.read_chunk(reader, max_chunk_size)? {
                return Ok(message);
            }
        }
    }

    /// Reads a single chunk, returning the message it completed (if any)
    fn read_chunk<R: Read>(
        &mut self,
        reader: &mut R,
        max_chunk_size: usize,
    ) -> Result<Option<MessagePayload>, ChunkDeserializationError> {
        let (format, csid) = read_basic_header(reader)?;
        let context = self
            .contexts
            .entry(csid)
            .or_insert_with(ChunkStreamContext::new);

        let header = read_message_header(reader, format, csid, context)?;
        let message_length = header.message_length as usize;
        let remaining = message_length.saturating_sub(context.bytes_accumulated());
        let slice_length = min(remaining, max_chunk_size);

        trace!(
            csid,
            format = format.id(),
            timestamp = header.timestamp.value,
            message_length,
            slice_length,
            "Read chunk header"
        );

        context.read_payload(reader, slice_length)?;
        let is_complete = context.bytes_accumulated() == message_length;
        let message = if is_complete {
            Some(MessagePayload {
                timestamp: header.timestamp,
                type_id: header.message_type_id,
                message_stream_id: header.message_stream_id,
                chunk_stream_id: csid,
                data: context.take_payload(),
            })
        } else {
            None
        };

        context.previous_header = Some(header);
        Ok(message)
    }
}

impl Default for ChunkStreamDemultiplexer {
    fn default() -> Self {
        ChunkStreamDemultiplexer::new()
    }
}

fn read_message_header<R: Read>(
    reader: &mut R,
    format: ChunkHeaderFormat,
    csid: u32,
    context: &ChunkStreamContext,
) -> Result<ChunkHeader, ChunkDeserializationError> {
    let in_progress = context.is_message_in_progress();
    let previous = context.previous_header.as_ref();

    if in_progress && format != ChunkHeaderFormat::Empty {
        let message_length = previous.map_or(0, |header| header.message_length as usize);
        return Err(ChunkDeserializationError::MessageInterrupted {
            csid,
            format: format.id(),
            bytes_remaining: message_length.saturating_sub(context.bytes_accumulated()),
        });
    }

    let header = match (format, previous) {
        (ChunkHeaderFormat::Full, _) => {
            let timestamp_field = reader.read_u24::<BigEndian>()?;
            let message_length = reader.read_u24::<BigEndian>()?;
            let message_type_id = reader.read_u8()?;
            let message_stream_id = reader.read_u32::<LittleEndian>()?;
            let (timestamp, has_extended_timestamp) =
                read_extended_timestamp(reader, timestamp_field)?;

            ChunkHeader {
                format,
                chunk_stream_id: csid,
                timestamp: RtmpTimestamp::new(timestamp),
                timestamp_delta: timestamp,
                has_extended_timestamp,
                message_length,
                message_type_id,
                message_stream_id,
            }
        }

        (_, None) => return Err(ChunkDeserializationError::NoPreviousChunkOnStream { csid }),

        (ChunkHeaderFormat::TimeDeltaWithoutMessageStreamId, Some(previous)) => {
            let delta_field = reader.read_u24::<BigEndian>()?;
            let message_length = reader.read_u24::<BigEndian>()?;
            let message_type_id = reader.read_u8()?;
            let (delta, has_extended_timestamp) = read_extended_timestamp(reader, delta_field)?;

            ChunkHeader {
                format,
                chunk_stream_id: csid,
                timestamp: previous.timestamp + delta,
                timestamp_delta: delta,
                has_extended_timestamp,
                message_length,
                message_type_id,
                message_stream_id: previous.message_stream_id,
            }
        }

        (ChunkHeaderFormat::TimeDeltaOnly, Some(previous)) => {
            let delta_field = reader.read_u24::<BigEndian>()?;
            let (delta, has_extended_timestamp) = read_extended_timestamp(reader, delta_field)?;

            ChunkHeader {
                format,
                timestamp: previous.timestamp + delta,
                timestamp_delta: delta,
                has_extended_timestamp,
                ..previous.clone()
            }
        }

        (ChunkHeaderFormat::Empty, Some(previous)) => {
            let mut header = ChunkHeader {
                format,
                ..previous.clone()
            };

            if previous.has_extended_timestamp {
                let extended_timestamp = reader.read_u32::<BigEndian>()?;
                if !in_progress {
                    header.timestamp_delta = extended_timestamp;
                }
            }

            // Continuation chunks belong to a message whose timestamp is already known.  The
            // delta is only re-applied when a type 3 chunk starts a new message.
            if !in_progress {
                header.timestamp = previous.timestamp + header.timestamp_delta;
            }

            header
        }
    };

    Ok(header)
}

/// Returns the real timestamp (or delta) and whether an extended timestamp was present
fn read_extended_timestamp<R: Read>(
    reader: &mut R,
    timestamp_field: u32,
) -> Result<(u32, bool), ChunkDeserializationError> {
    if timestamp_field < MAX_TIMESTAMP_FIELD {
        return Ok((timestamp_field, false));
    }

    Ok((reader.read_u32::<BigEndian>()?, true))
}
