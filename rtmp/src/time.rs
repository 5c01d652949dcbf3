//! RTMP timestamps are 32 bit unsigned integers representing the number of milliseconds from
//! an unknown epoch.
//!
//! Chunk headers mostly carry timestamp *deltas*, which are accumulated onto the previous
//! timestamp of the same chunk stream.  Long running streams eventually overflow 32 bits, so
//! all arithmetic on an `RtmpTimestamp` wraps instead of panicking.
//!
//! # Examples
//!
//! ```
//! use rml_rtmp_ingest::time::RtmpTimestamp;
//!
//! let mut time = RtmpTimestamp::new(10);
//! assert_eq!(time + 20, RtmpTimestamp::new(30));
//!
//! time.set(u32::max_value());
//! assert_eq!(time + 60, 59);
//! ```

use std::fmt;
use std::ops::Add;

/// The representation of a RTMP timestamp
#[derive(Eq, PartialEq, Debug, Copy, Clone, Default)]
pub struct RtmpTimestamp {
    /// The time (as milliseconds from an unknown epoch) being represented by the timestamp
    pub value: u32,
}

impl RtmpTimestamp {
    /// Creates a new timestamp with the specified time value
    pub fn new(initial_value: u32) -> Self {
        RtmpTimestamp {
            value: initial_value,
        }
    }

    /// Sets the timestamp to a new time value
    pub fn set(&mut self, new_value: u32) {
        self.value = new_value;
    }
}

impl Add<u32> for RtmpTimestamp {
    type Output = RtmpTimestamp;

    fn add(self, delta: u32) -> Self {
        RtmpTimestamp {
            value: self.value.wrapping_add(delta),
        }
    }
}

impl PartialEq<u32> for RtmpTimestamp {
    fn eq(&self, other: &u32) -> bool {
        self.value == *other
    }
}

impl fmt::Display for RtmpTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}ms", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::RtmpTimestamp;

    #[test]
    fn can_add_delta_to_timestamp() {
        let time = RtmpTimestamp::new(50);
        let result = time + 60;

        assert_eq!(result.value, 110);
    }

    #[test]
    fn adding_delta_wraps_around_u32() {
        let time = RtmpTimestamp::new(u32::max_value() - 10);
        let result = time + 20;

        assert_eq!(result.value, 9);
    }

    #[test]
    fn can_set_timestamp_value() {
        let mut time = RtmpTimestamp::new(50);
        time.set(60);

        assert_eq!(time, 60);
    }

    #[test]
    fn displays_as_milliseconds() {
        assert_eq!(RtmpTimestamp::new(1234).to_string(), "1234ms");
    }
}
