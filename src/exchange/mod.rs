// src/exchange/mod.rs

mod io_helpers;
mod validation;

#[cfg(test)]
pub(crate) mod mock;

use crate::common::{
    command::Command,
    error::ExchangeError,
    frame::ResponseFrame,
    hal_traits::{ExchangeTimer, ImuSerial},
    payload::ScanStop,
    timing,
    types::{EulerAngles, Quaternion},
};
use core::time::Duration;
use tracing::trace;

/// Timing knobs for one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeConfig {
    /// How long to collect reply bytes after the command is written.
    pub response_timeout: Duration,
    /// Sleep between read attempts that returned nothing.
    pub poll_interval: Duration,
    /// Bound on writing the command. `None` waits for the transport indefinitely.
    pub write_timeout: Option<Duration>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            response_timeout: timing::RESPONSE_TIMEOUT,
            poll_interval: timing::POLL_INTERVAL,
            write_timeout: Some(timing::WRITE_TIMEOUT),
        }
    }
}

/// What the received frame turned out to be.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// An echo frame whose payload was decoded (possibly into zero slots).
    Decoded,
    /// No bytes arrived before the timeout.
    NoResponse,
    /// The reply echoed a different command name.
    NameMismatch,
    /// The echoed name was not followed by `=`.
    MissingSeparator,
    /// The first payload value was not a number.
    InvalidValue,
}

/// Detailed result of one exchange.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExchangeReport {
    /// Values written to the front of the output slice.
    pub decoded: usize,
    pub outcome: FrameOutcome,
    /// Where value decoding stopped, for echo frames.
    pub scan_stop: Option<ScanStop>,
    /// The response window closed before a terminator arrived.
    pub timed_out: bool,
    /// Bytes collected, including the terminator.
    pub frame_len: usize,
}

/// Drives command/response exchanges with one sensor.
///
/// Owns the interface for its whole lifetime; get it back with
/// [`ExchangeEngine::into_inner`]. Dropping the engine drops the interface.
#[derive(Debug)]
pub struct ExchangeEngine<IF>
where
    IF: ImuSerial + ExchangeTimer,
{
    interface: IF,
    config: ExchangeConfig,
}

impl<IF> ExchangeEngine<IF>
where
    IF: ImuSerial + ExchangeTimer,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, ExchangeConfig::default())
    }

    pub fn with_config(interface: IF, config: ExchangeConfig) -> Self {
        ExchangeEngine { interface, config }
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ExchangeConfig) {
        self.config = config;
    }

    pub fn interface(&self) -> &IF {
        &self.interface
    }

    /// Releases the interface.
    pub fn into_inner(self) -> IF {
        self.interface
    }

    // --- Public Blocking Methods ---

    /// Sends `command` and decodes the reply into `output`.
    ///
    /// Returns how many values were decoded (`0..=output.len()`). Timeouts,
    /// echo mismatches and malformed payloads yield `Ok(0)`; only channel
    /// faults and `!` device replies are errors.
    pub fn send_receive(
        &mut self,
        command: &Command,
        output: &mut [f64],
    ) -> Result<usize, ExchangeError<IF::Error>> {
        self.exchange(command, output).map(|report| report.decoded)
    }

    /// Like [`send_receive`](Self::send_receive), but reports why a frame
    /// produced no data.
    pub fn exchange(
        &mut self,
        command: &Command,
        output: &mut [f64],
    ) -> Result<ExchangeReport, ExchangeError<IF::Error>> {
        // No sequence numbers on the wire, so stale bytes must go before every command
        self.interface.discard_pending();

        let line = command.wire_bytes();
        self.send_command_bytes(line.as_bytes())?;

        let mut frame = ResponseFrame::new();
        let end = self.accumulate_frame(&mut frame)?;
        trace!(command = command.name(), frame = frame.as_text(), ?end, "frame collected");

        self.evaluate_frame(command, &frame, end, output)
    }

    /// Reads Euler angles; `Ok(None)` when fewer than three values arrived.
    pub fn read_euler(&mut self) -> Result<Option<EulerAngles>, ExchangeError<IF::Error>> {
        let mut values = [0.0; EulerAngles::FIELD_COUNT];
        let decoded = self.send_receive(&Command::euler(), &mut values)?;
        Ok(EulerAngles::from_values(&values[..decoded]))
    }

    /// Reads the quaternion; `Ok(None)` when fewer than four values arrived.
    pub fn read_quaternion(&mut self) -> Result<Option<Quaternion>, ExchangeError<IF::Error>> {
        let mut values = [0.0; Quaternion::FIELD_COUNT];
        let decoded = self.send_receive(&Command::quaternion(), &mut values)?;
        Ok(Quaternion::from_values(&values[..decoded]))
    }
}
