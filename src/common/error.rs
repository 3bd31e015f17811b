// src/common/error.rs

use arrayvec::ArrayString;
use core::fmt;

/// Maximum number of diagnostic characters kept from a device error frame.
pub const DEVICE_MESSAGE_CAPACITY: usize = 64;

/// Diagnostic text that followed the `!` of a device error frame.
///
/// Non-printable bytes and the line terminator are dropped; text beyond
/// [`DEVICE_MESSAGE_CAPACITY`] is truncated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceMessage(ArrayString<DEVICE_MESSAGE_CAPACITY>);

impl DeviceMessage {
    /// Builds the message from the bytes after `!`.
    pub fn from_frame_tail(tail: &[u8]) -> Self {
        let mut text = ArrayString::new();
        for &byte in tail {
            if byte == b'\r' || byte == b'\n' {
                break;
            }
            if !(byte.is_ascii_graphic() || byte == b' ') {
                continue;
            }
            if text.try_push(byte as char).is_err() {
                break;
            }
        }
        DeviceMessage(text)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeviceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Errors that end an exchange.
///
/// Soft "no data" outcomes (timeout, name mismatch, malformed payload) are
/// not errors; they show up as a decoded count of zero.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError<E = ()>
where
    E: fmt::Debug, // Still need Debug for the generic Io error
{
    /// Underlying I/O error from the transport (write failure or read fault).
    #[error("I/O error: {0:?}")]
    Io(E),

    /// The transport would not accept the whole command before the write deadline.
    #[error("Command write timed out after {written} of {total} bytes")]
    WriteTimeout { written: usize, total: usize },

    /// The device answered with an `!` error frame.
    #[error("Device reported error: '{0}'")]
    Device(DeviceMessage),
}

impl<E: fmt::Debug> ExchangeError<E> {
    /// True for failures of the channel itself (`Io` and `WriteTimeout`).
    pub fn is_communication(&self) -> bool {
        matches!(self, ExchangeError::Io(_) | ExchangeError::WriteTimeout { .. })
    }

    /// True when the device itself rejected the command.
    pub fn is_device(&self) -> bool {
        matches!(self, ExchangeError::Device(_))
    }
}

// Allow mapping from the underlying transport error
impl<E: fmt::Debug> From<E> for ExchangeError<E> {
    fn from(e: E) -> Self {
        ExchangeError::Io(e)
    }
}

/// Rejected command names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Command name is empty")]
    Empty,

    #[error("Command name too long: {len} bytes (max {max})")]
    TooLong { len: usize, max: usize },

    /// Not printable ASCII, or one of the protocol's reserved bytes.
    #[error("Invalid character in command name: {0:#04x}")]
    InvalidCharacter(u8),

    /// A raw command line did not end in `\n`.
    #[error("Command line is missing its newline terminator")]
    MissingTerminator,
}
