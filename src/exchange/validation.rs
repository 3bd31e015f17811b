// src/exchange/validation.rs

use super::io_helpers::AccumulationEnd;
use super::{ExchangeEngine, ExchangeReport, FrameOutcome};
use crate::common::{
    command::Command,
    error::{DeviceMessage, ExchangeError},
    frame::{FrameKind, ResponseFrame},
    hal_traits::{ExchangeTimer, ImuSerial},
    payload::{parse_values, ScanStop},
};
use tracing::{debug, warn};

impl<IF> ExchangeEngine<IF>
where
    IF: ImuSerial + ExchangeTimer,
{
    /// Checks the frame against the command that produced it and decodes
    /// the payload into `output`.
    pub(super) fn evaluate_frame(
        &self,
        command: &Command,
        frame: &ResponseFrame,
        end: AccumulationEnd,
        output: &mut [f64],
    ) -> Result<ExchangeReport, ExchangeError<IF::Error>> {
        let report = |decoded: usize, outcome: FrameOutcome, scan_stop: Option<ScanStop>| ExchangeReport {
            decoded,
            outcome,
            scan_stop,
            timed_out: end == AccumulationEnd::TimedOut,
            frame_len: frame.len(),
        };

        match frame.classify(command.name().as_bytes()) {
            FrameKind::Empty => Ok(report(0, FrameOutcome::NoResponse, None)),
            FrameKind::DeviceError(tail) => {
                let message = DeviceMessage::from_frame_tail(tail);
                warn!(command = command.name(), %message, "device rejected command");
                Err(ExchangeError::Device(message))
            }
            FrameKind::NameMismatch => {
                debug!(command = command.name(), frame = frame.as_text(), "reply echoed another command");
                Ok(report(0, FrameOutcome::NameMismatch, None))
            }
            FrameKind::MissingSeparator => {
                debug!(command = command.name(), frame = frame.as_text(), "reply missing '='");
                Ok(report(0, FrameOutcome::MissingSeparator, None))
            }
            FrameKind::Echo(payload) => {
                let scan = parse_values(payload, output);
                let outcome = match scan.stop {
                    ScanStop::InvalidValue { index: 0 } => {
                        debug!(command = command.name(), frame = frame.as_text(), "payload has no leading number");
                        FrameOutcome::InvalidValue
                    }
                    _ => FrameOutcome::Decoded,
                };
                Ok(report(scan.decoded, outcome, Some(scan.stop)))
            }
        }
    }
}
