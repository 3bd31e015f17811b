// src/exchange/io_helpers.rs

use super::ExchangeEngine;
use crate::common::{
    error::ExchangeError,
    frame::ResponseFrame,
    hal_traits::{ExchangeTimer, ImuSerial},
    timing,
};
use core::time::Duration;
use tracing::{debug, trace};

/// How response accumulation ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum AccumulationEnd {
    /// Last byte received was `\r` or `\n`.
    Terminated,
    /// Frame buffer filled up before a terminator.
    Full,
    /// Response window elapsed.
    TimedOut,
}

// Implementation block for I/O related helpers
impl<IF> ExchangeEngine<IF>
where
    IF: ImuSerial + ExchangeTimer,
{
    fn poll_delay(&mut self) {
        let us = self.config.poll_interval.as_micros().min(u32::MAX as u128) as u32;
        self.interface.delay_us(us);
    }

    fn elapsed_since(&self, start: IF::Instant) -> Duration {
        self.interface.now() - start
    }

    /// Writes the whole command, retrying partial and would-block writes.
    pub(super) fn send_command_bytes(&mut self, cmd_bytes: &[u8]) -> Result<(), ExchangeError<IF::Error>> {
        let start = self.interface.now();
        let total = cmd_bytes.len();
        let mut written = 0;

        while written < total {
            match self.interface.write(&cmd_bytes[written..]) {
                Ok(n) if n > 0 => written += n.min(total - written),
                Ok(_) | Err(nb::Error::WouldBlock) => {
                    if let Some(limit) = self.config.write_timeout {
                        if self.elapsed_since(start) >= limit {
                            debug!(written, total, "command write timed out");
                            return Err(ExchangeError::WriteTimeout { written, total });
                        }
                    }
                    self.poll_delay();
                }
                Err(nb::Error::Other(e)) => {
                    debug!(error = ?e, "command write failed");
                    return Err(ExchangeError::Io(e));
                }
            }
        }

        Ok(())
    }

    /// Collects reply bytes into `frame` until a terminator, a full buffer,
    /// or the response timeout. Only a read fault is an error.
    pub(super) fn accumulate_frame(
        &mut self,
        frame: &mut ResponseFrame,
    ) -> Result<AccumulationEnd, ExchangeError<IF::Error>> {
        let start = self.interface.now();
        let mut chunk = [0u8; timing::READ_CHUNK];

        loop {
            if frame.is_full() {
                return Ok(AccumulationEnd::Full);
            }

            let room = frame.remaining_capacity().min(chunk.len());
            match self.interface.read(&mut chunk[..room]) {
                Ok(n) if n > 0 => {
                    frame.extend_truncating(&chunk[..n.min(room)]);
                    if frame.is_complete() {
                        return Ok(AccumulationEnd::Terminated);
                    }
                }
                Ok(_) | Err(nb::Error::WouldBlock) => self.poll_delay(),
                Err(nb::Error::Other(e)) => {
                    debug!(error = ?e, received = frame.len(), "read failed mid-frame");
                    return Err(ExchangeError::Io(e));
                }
            }

            if self.elapsed_since(start) >= self.config.response_timeout {
                trace!(received = frame.len(), "response window elapsed");
                return Ok(AccumulationEnd::TimedOut);
            }
        }
    }
}
