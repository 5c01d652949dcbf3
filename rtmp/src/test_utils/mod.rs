//! Helpers shared by the unit tests: an in-memory duplex stream and a minimal RTMP chunk
//! encoder used to produce input for the demultiplexer.

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use std::io::{self, Cursor, Read, Write};

const MAX_TIMESTAMP_FIELD: u32 = 0xFFFFFF;

/// A `Read + Write` stream that reads from a fixed input and records everything written
pub struct MockStream {
    input: Cursor<Vec<u8>>,
    pub written: Vec<u8>,

    /// How many written bytes had been flushed at the time of the last `flush()` call
    pub flushed_bytes: usize,
}

impl MockStream {
    pub fn new(input: Vec<u8>) -> MockStream {
        MockStream {
            input: Cursor::new(input),
            written: Vec::new(),
            flushed_bytes: 0,
        }
    }
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed_bytes = self.written.len();
        Ok(())
    }
}

/// The message header to put on the first chunk of a message
#[derive(Clone, Copy, Debug)]
pub enum FirstHeader {
    Full {
        timestamp: u32,
        message_stream_id: u32,
        type_id: u8,
    },
    TimeDeltaWithoutMessageStreamId {
        delta: u32,
        type_id: u8,
    },
    TimeDeltaOnly {
        delta: u32,
    },
    Empty {
        extended_timestamp: Option<u32>,
    },
}

/// Splits a message into chunks.  The first chunk carries `header`, the rest are type 3
/// chunks (with an extended timestamp when the first chunk used one).
pub fn form_chunks(
    csid: u32,
    header: FirstHeader,
    payload: &[u8],
    max_chunk_size: usize,
) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut cursor = Cursor::new(Vec::new());
    let message_length = payload.len() as u32;

    let extended_timestamp = match header {
        FirstHeader::Full {
            timestamp,
            message_stream_id,
            type_id,
        } => {
            write_basic_header(&mut cursor, 0, csid);
            cursor.write_u24::<BigEndian>(timestamp_field(timestamp)).unwrap();
            cursor.write_u24::<BigEndian>(message_length).unwrap();
            cursor.write_u8(type_id).unwrap();
            cursor.write_u32::<LittleEndian>(message_stream_id).unwrap();
            extended(timestamp)
        }

        FirstHeader::TimeDeltaWithoutMessageStreamId { delta, type_id } => {
            write_basic_header(&mut cursor, 1, csid);
            cursor.write_u24::<BigEndian>(timestamp_field(delta)).unwrap();
            cursor.write_u24::<BigEndian>(message_length).unwrap();
            cursor.write_u8(type_id).unwrap();
            extended(delta)
        }

        FirstHeader::TimeDeltaOnly { delta } => {
            write_basic_header(&mut cursor, 2, csid);
            cursor.write_u24::<BigEndian>(timestamp_field(delta)).unwrap();
            extended(delta)
        }

        FirstHeader::Empty { extended_timestamp } => {
            write_basic_header(&mut cursor, 3, csid);
            extended_timestamp
        }
    };

    if let Some(value) = extended_timestamp {
        cursor.write_u32::<BigEndian>(value).unwrap();
    }

    let mut slices = payload.chunks(max_chunk_size);
    cursor.write_all(slices.next().unwrap_or(&[])).unwrap();
    chunks.push(cursor.into_inner());

    for slice in slices {
        let mut cursor = Cursor::new(Vec::new());
        write_basic_header(&mut cursor, 3, csid);
        if let Some(value) = extended_timestamp {
            cursor.write_u32::<BigEndian>(value).unwrap();
        }

        cursor.write_all(slice).unwrap();
        chunks.push(cursor.into_inner());
    }

    chunks
}

/// Forms all chunks of a message as a single contiguous byte vector
pub fn form_message(
    csid: u32,
    header: FirstHeader,
    payload: &[u8],
    max_chunk_size: usize,
) -> Vec<u8> {
    form_chunks(csid, header, payload, max_chunk_size).concat()
}

/// Forms a complete, unsplit message on chunk stream 2 and message stream 0, which is where
/// protocol control messages are sent.
pub fn form_control_message(type_id: u8, payload: &[u8]) -> Vec<u8> {
    let header = FirstHeader::Full {
        timestamp: 0,
        message_stream_id: 0,
        type_id,
    };

    form_message(2, header, payload, payload.len().max(1))
}

pub fn write_basic_header(cursor: &mut Cursor<Vec<u8>>, format: u8, csid: u32) {
    let format_bits = format << 6;
    if csid < 64 {
        cursor.write_u8(format_bits | csid as u8).unwrap();
    } else if csid < 320 {
        cursor.write_u8(format_bits).unwrap();
        cursor.write_u8((csid - 64) as u8).unwrap();
    } else {
        cursor.write_u8(format_bits | 1).unwrap();
        cursor.write_u16::<LittleEndian>((csid - 64) as u16).unwrap();
    }
}

fn timestamp_field(value: u32) -> u32 {
    if value >= MAX_TIMESTAMP_FIELD {
        MAX_TIMESTAMP_FIELD
    } else {
        value
    }
}

fn extended(value: u32) -> Option<u32> {
    if value >= MAX_TIMESTAMP_FIELD {
        Some(value)
    } else {
        None
    }
}
