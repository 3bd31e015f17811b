// src/common/timing.rs

use core::time::Duration;

/// Time allowed for a reply to arrive, measured from the end of the command write.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_millis(30);

/// Sleep between read attempts that returned nothing.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Time allowed for the transport to accept the whole command.
/// The device protocol sets no limit here; this keeps a stalled port from hanging an exchange.
pub const WRITE_TIMEOUT: Duration = Duration::from_millis(30);

/// Largest chunk requested from the transport per read call.
pub const READ_CHUNK: usize = 256;
