// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::Sub;
use core::time::Duration;

/// A point in time as reported by an [`ExchangeTimer`].
///
/// Any copyable, ordered type whose difference is a `Duration` qualifies
/// (`std::time::Instant` does).
pub trait ImuInstant: Copy + PartialOrd + Sub<Self, Output = Duration> {}

impl<T> ImuInstant for T where T: Copy + PartialOrd + Sub<T, Output = Duration> {}

/// Abstraction for the clock and delays used to bound an exchange.
pub trait ExchangeTimer {
    type Instant: ImuInstant;

    /// Current monotonic time.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);
}

/// Abstraction for the byte channel to the sensor.
///
/// Reads and writes are non-blocking: "nothing available right now" is
/// `Err(nb::Error::WouldBlock)` (an `Ok(0)` read is treated the same way).
/// Genuine channel faults are `Err(nb::Error::Other(Self::Error))`.
pub trait ImuSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Drops whatever input is already buffered. Best-effort, never blocks.
    fn discard_pending(&mut self);

    /// Attempts to write `bytes`, returning how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> nb::Result<usize, Self::Error>;

    /// Attempts to read into `buffer`, returning how many bytes were stored.
    fn read(&mut self, buffer: &mut [u8]) -> nb::Result<usize, Self::Error>;
}
