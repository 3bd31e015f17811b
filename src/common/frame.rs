// src/common/frame.rs

use heapless::Vec;

/// Bytes a single response frame can hold.
pub const FRAME_CAPACITY: usize = 1024;

/// First byte of a device error reply.
pub const ERROR_MARKER: u8 = b'!';

/// Separates the echoed command name from the values.
pub const NAME_SEPARATOR: u8 = b'=';

/// Separates consecutive values in the payload.
pub const VALUE_SEPARATOR: u8 = b',';

/// Returns true for the bytes that end a reply line.
#[inline]
pub fn is_terminator(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}

/// Response bytes collected for one exchange.
///
/// Appends past [`FRAME_CAPACITY`] are truncated, never overflowed.
#[derive(Debug, Clone, Default)]
pub struct ResponseFrame {
    bytes: Vec<u8, FRAME_CAPACITY>,
}

/// Shape of a frame, relative to the command that produced it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameKind<'a> {
    /// Nothing arrived.
    Empty,
    /// `!...` device error; holds the bytes after the marker.
    DeviceError(&'a [u8]),
    /// The echoed name did not match the command.
    NameMismatch,
    /// Name matched but was not followed by `=`.
    MissingSeparator,
    /// `name=...`; holds the bytes after `=`.
    Echo(&'a [u8]),
}

impl ResponseFrame {
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Appends as much of `data` as fits and returns how many bytes were taken.
    pub fn extend_truncating(&mut self, data: &[u8]) -> usize {
        let take = data.len().min(self.remaining_capacity());
        // `take` never exceeds the free space
        let _ = self.bytes.extend_from_slice(&data[..take]);
        take
    }

    pub fn remaining_capacity(&self) -> usize {
        FRAME_CAPACITY - self.bytes.len()
    }

    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True once the most recently received byte is `\r` or `\n`.
    pub fn is_complete(&self) -> bool {
        self.bytes.last().copied().map_or(false, is_terminator)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Frame contents as text for logging; non-UTF-8 frames show a placeholder.
    pub fn as_text(&self) -> &str {
        core::str::from_utf8(&self.bytes).unwrap_or("<non-utf8>")
    }

    /// Classifies the frame against the command name `name`.
    pub fn classify(&self, name: &[u8]) -> FrameKind<'_> {
        let bytes = self.as_bytes();
        match bytes.first() {
            None => FrameKind::Empty,
            Some(&ERROR_MARKER) => FrameKind::DeviceError(&bytes[1..]),
            Some(_) => match bytes.strip_prefix(name) {
                None => FrameKind::NameMismatch,
                Some(rest) => match rest.split_first() {
                    Some((&NAME_SEPARATOR, payload)) => FrameKind::Echo(payload),
                    _ => FrameKind::MissingSeparator,
                },
            },
        }
    }
}
