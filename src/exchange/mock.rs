// src/exchange/mock.rs
//
// Scripted interface shared by the exchange tests.

use crate::common::hal_traits::{ExchangeTimer, ImuSerial};
use core::time::Duration;
use std::collections::VecDeque;

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MockInstant(u64);

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockCommError;

/// One scripted answer to a `read` call.
#[derive(Debug, Clone)]
pub(crate) enum MockRead {
    Data(&'static [u8]),
    Idle,
    Fail,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum MockWrite {
    Accept,
    /// Accept at most this many bytes per call.
    Chunked(usize),
    Stall,
    Fail,
}

/// Reads follow the script; once it runs out every read would block.
/// Time only moves when the engine delays.
pub(crate) struct MockInterface {
    pub now_us: u64,
    pub reads: VecDeque<MockRead>,
    /// Leftover bytes from an earlier reply, served before the script.
    pub stale: Vec<u8>,
    pub written: Vec<u8>,
    pub write_mode: MockWrite,
    /// Writes that would block before `write_mode` applies.
    pub write_stalls: usize,
    pub discard_calls: usize,
    pub read_calls: usize,
}

impl MockInterface {
    pub fn with_reads(reads: &[MockRead]) -> Self {
        MockInterface {
            now_us: 0,
            reads: reads.iter().cloned().collect(),
            stale: Vec::new(),
            written: Vec::new(),
            write_mode: MockWrite::Accept,
            write_stalls: 0,
            discard_calls: 0,
            read_calls: 0,
        }
    }
}

impl ExchangeTimer for MockInterface {
    type Instant = MockInstant;

    fn now(&self) -> MockInstant {
        MockInstant(self.now_us)
    }

    fn delay_us(&mut self, us: u32) {
        self.now_us = self.now_us.saturating_add(us as u64);
    }
}

impl ImuSerial for MockInterface {
    type Error = MockCommError;

    fn discard_pending(&mut self) {
        self.discard_calls += 1;
        self.stale.clear();
    }

    fn write(&mut self, bytes: &[u8]) -> nb::Result<usize, MockCommError> {
        if self.write_stalls > 0 {
            self.write_stalls -= 1;
            return Err(nb::Error::WouldBlock);
        }
        let take = match self.write_mode {
            MockWrite::Accept => bytes.len(),
            MockWrite::Chunked(n) => bytes.len().min(n),
            MockWrite::Stall => return Err(nb::Error::WouldBlock),
            MockWrite::Fail => return Err(nb::Error::Other(MockCommError)),
        };
        self.written.extend_from_slice(&bytes[..take]);
        Ok(take)
    }

    fn read(&mut self, buffer: &mut [u8]) -> nb::Result<usize, MockCommError> {
        self.read_calls += 1;
        if !self.stale.is_empty() {
            let n = self.stale.len().min(buffer.len());
            buffer[..n].copy_from_slice(&self.stale[..n]);
            self.stale.drain(..n);
            return Ok(n);
        }
        match self.reads.pop_front() {
            Some(MockRead::Data(data)) => {
                let n = data.len().min(buffer.len());
                buffer[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    // Keep the rest for the next call
                    self.reads.push_front(MockRead::Data(&data[n..]));
                }
                Ok(n)
            }
            Some(MockRead::Idle) | None => Err(nb::Error::WouldBlock),
            Some(MockRead::Fail) => Err(nb::Error::Other(MockCommError)),
        }
    }
}
