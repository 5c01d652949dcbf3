//! The simple (non-digest) RTMP handshake, performed from the server's side.
//!
//! The exchange looks like:
//!
//! ```text
//!  client                          server
//!    | --- C0 (version = 3) -------> |
//!    | --- C1 (1536 bytes) --------> |
//!    | <-- S0, S1, S2 (echo of C1) - |
//!    | --- C2 (1536 bytes) --------> |
//! ```
//!
//! Both peers must complete the handshake before any RTMP chunks are exchanged.  Reads are
//! exact: a packet is either received in full or the handshake fails.

mod errors;

pub use self::errors::HandshakeError;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use rand::Rng;
use std::io::{Cursor, Read, Write};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// The only RTMP version byte that is accepted in C0 and sent back in S0
pub const RTMP_VERSION: u8 = 3;

const RANDOM_DATA_SIZE: usize = 1528;

/// The size of C1, C2, S1 and S2 packets
pub const PACKET_SIZE: usize = 8 + RANDOM_DATA_SIZE;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Stage {
    WaitingForPacket0,
    WaitingForPacket1,
    WaitingForPacket2,
    Complete,
}

/// Server side state for a single handshake.
///
/// The state only lives as long as the handshake does and is not needed once `perform()`
/// returns successfully.
pub struct Handshake {
    my_epoch: u32,
    my_random: [u8; RANDOM_DATA_SIZE],
    their_epoch: u32,
    current_stage: Stage,
}

impl Handshake {
    /// Creates a new handshake with a fresh server epoch and random payload
    pub fn new() -> Handshake {
        let my_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs() as u32)
            .unwrap_or(0);

        Handshake {
            my_epoch,
            my_random: create_random_data(),
            their_epoch: 0,
            current_stage: Stage::WaitingForPacket0,
        }
    }

    /// The time value the peer sent in C1.  Only meaningful after a successful `perform()`.
    pub fn their_epoch(&self) -> u32 {
        self.their_epoch
    }

    /// Returns true once C2 has been received
    pub fn is_completed(&self) -> bool {
        self.current_stage == Stage::Complete
    }

    /// Runs the full handshake against the stream, blocking until C2 has been received.
    ///
    /// S1 and S2 are flushed before C2 is read, as peers are allowed to wait for them before
    /// sending C2.  On any error the handshake is left in an incomplete state and the
    /// connection should be closed.
    pub fn perform<S: Read + Write>(&mut self, stream: &mut S) -> Result<(), HandshakeError> {
        if self.current_stage == Stage::Complete {
            return Err(HandshakeError::HandshakeAlreadyCompleted);
        }

        let version = stream.read_u8()?;
        if version != RTMP_VERSION {
            return Err(HandshakeError::BadVersionId { version });
        }

        stream.write_u8(RTMP_VERSION)?;
        self.current_stage = Stage::WaitingForPacket1;
        trace!("Received c0, sent s0");

        let mut packet1 = vec![0_u8; PACKET_SIZE];
        stream.read_exact(&mut packet1)?;

        let (time, time2) = {
            let mut cursor = Cursor::new(&packet1[..8]);
            (cursor.read_u32::<BigEndian>()?, cursor.read_u32::<BigEndian>()?)
        };

        if time2 != 0 {
            return Err(HandshakeError::NonZeroedTimeInPacket1 { value: time2 });
        }

        self.their_epoch = time;

        // S1 followed by S2, which is the exact bytes of C1 sent back
        let mut response = self.create_packet_1()?;
        response.extend_from_slice(&packet1);
        stream.write_all(&response)?;
        stream.flush()?;

        self.current_stage = Stage::WaitingForPacket2;
        trace!(peer_epoch = time, "Received c1, sent s1 and s2");

        let mut packet2 = vec![0_u8; PACKET_SIZE];
        stream.read_exact(&mut packet2)?;

        self.current_stage = Stage::Complete;
        debug!(peer_epoch = self.their_epoch, "Handshake completed");
        Ok(())
    }

    fn create_packet_1(&self) -> Result<Vec<u8>, HandshakeError> {
        let mut packet = Cursor::new(Vec::with_capacity(PACKET_SIZE + PACKET_SIZE));
        packet.write_u32::<BigEndian>(self.my_epoch)?;
        packet.write_u32::<BigEndian>(0)?;
        packet.write_all(&self.my_random)?;

        Ok(packet.into_inner())
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Handshake::new()
    }
}

/// Performs the server side of the simple RTMP handshake on the given stream
pub fn perform_handshake<S: Read + Write>(stream: &mut S) -> Result<(), HandshakeError> {
    Handshake::new().perform(stream)
}

fn create_random_data() -> [u8; RANDOM_DATA_SIZE] {
    let mut random_data = [0_u8; RANDOM_DATA_SIZE];
    rand::thread_rng().fill(&mut random_data[..]);
    random_data
}
