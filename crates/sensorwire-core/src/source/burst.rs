//! Bounded reads of frame bursts from a byte source.
//!
//! Frame-protocol sensors emit each frame as a tight burst of bytes followed
//! by silence. A burst ends after an inter-byte gap, when the capacity is
//! reached, or at the overall deadline; a read that sees no byte before the
//! deadline reports [`Burst::TimedOut`] instead of blocking.

use std::time::Duration;

use super::clock::Clock;
use super::{ByteSource, SourceError};
use crate::config::FrameConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Burst {
    Bytes(Vec<u8>),
    TimedOut { waited: Duration },
    /// The source is closed and drained.
    Closed,
}

#[derive(Debug, Clone)]
pub struct BurstReader {
    timeout: Duration,
    gap: Duration,
    poll: Duration,
    capacity: usize,
}

impl BurstReader {
    pub fn new(timeout: Duration, gap: Duration, poll: Duration, capacity: usize) -> Self {
        Self {
            timeout,
            gap,
            poll: poll.max(Duration::from_millis(1)),
            capacity: capacity.max(1),
        }
    }

    pub fn from_config(config: &FrameConfig) -> Self {
        Self::new(
            config.frame_timeout(),
            config.inter_byte_gap(),
            config.poll_interval(),
            config.burst_capacity,
        )
    }

    pub fn read<S, C>(&self, source: &mut S, clock: &C) -> Result<Burst, SourceError>
    where
        S: ByteSource + ?Sized,
        C: Clock + ?Sized,
    {
        let started = clock.now();
        let deadline = started + self.timeout;

        while source.available()? == 0 {
            if source.is_closed() {
                return Ok(Burst::Closed);
            }
            if clock.now() >= deadline {
                return Ok(Burst::TimedOut {
                    waited: clock.now() - started,
                });
            }
            clock.pause(self.poll);
        }

        let mut bytes = Vec::with_capacity(self.capacity);
        while bytes.len() < self.capacity {
            if source.available()? > 0 {
                bytes.push(source.read_byte()?);
                continue;
            }
            if source.is_closed() || clock.now() >= deadline {
                break;
            }
            let quiet_since = clock.now();
            while source.available()? == 0
                && !source.is_closed()
                && clock.now() - quiet_since < self.gap
                && clock.now() < deadline
            {
                clock.pause(self.poll);
            }
            if source.available()? == 0 {
                break;
            }
        }

        Ok(Burst::Bytes(bytes))
    }
}

impl Default for BurstReader {
    fn default() -> Self {
        Self::from_config(&FrameConfig::default())
    }
}
