//! Host serial port transport
//!
//! Opens the sensor's serial device in raw 8N1 mode with a zero OS read
//! timeout, so every read is a poll and the exchange engine owns all timing.

use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{self, Read, Write};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::common::hal_traits::{ExchangeTimer, ImuSerial};

/// Default device path for USB serial adapters on Linux
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Default baud rate for the sensor
pub const DEFAULT_BAUD_RATE: u32 = 115200;

/// Bytes read per call when draining stale input by hand
const DRAIN_CHUNK: usize = 256;

/// Serial port configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortConfig {
    /// Device path (e.g., "/dev/ttyUSB0" or "COM3")
    pub path: String,
    /// Baud rate
    pub baud_rate: u32,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// Monotonic host clock backed by `std::time::Instant` and `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostClock;

impl ExchangeTimer for HostClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(us as u64));
    }
}

/// Serial port plus the host clock, ready to hand to an `ExchangeEngine`.
///
/// The port closes when this value is dropped.
pub struct SerialInterface {
    port: Box<dyn SerialPort>,
    clock: HostClock,
}

impl SerialInterface {
    /// Open and configure the port described by `config`
    pub fn open(config: &PortConfig) -> serialport::Result<Self> {
        debug!(path = %config.path, baud = config.baud_rate, "opening serial port");
        let port = serialport::new(&config.path, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::ZERO)
            .open()?;
        Ok(Self::from_port(port))
    }

    /// Wrap an already-configured port
    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        Self { port, clock: HostClock }
    }

    /// Device name reported by the driver, if any
    pub fn name(&self) -> Option<String> {
        self.port.name()
    }

    pub fn into_port(self) -> Box<dyn SerialPort> {
        self.port
    }
}

impl std::fmt::Debug for SerialInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialInterface")
            .field("name", &self.port.name())
            .finish()
    }
}

/// Map an I/O result from a polled port onto the non-blocking contract.
fn to_nb<T>(result: io::Result<T>) -> nb::Result<T, io::Error> {
    result.map_err(|e| match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted => {
            nb::Error::WouldBlock
        }
        _ => nb::Error::Other(e),
    })
}

impl ImuSerial for SerialInterface {
    type Error = io::Error;

    fn discard_pending(&mut self) {
        if let Err(e) = self.port.clear(ClearBuffer::Input) {
            // Fall back to one non-blocking read, which is all the device guarantees
            trace!(error = %e, "clear failed, draining by read");
            let mut scratch = [0u8; DRAIN_CHUNK];
            let _ = self.port.read(&mut scratch);
        }
    }

    fn write(&mut self, bytes: &[u8]) -> nb::Result<usize, io::Error> {
        to_nb(self.port.write(bytes))
    }

    fn read(&mut self, buffer: &mut [u8]) -> nb::Result<usize, io::Error> {
        to_nb(self.port.read(buffer))
    }
}

impl ExchangeTimer for SerialInterface {
    type Instant = Instant;

    fn now(&self) -> Instant {
        self.clock.now()
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.delay_us(us);
    }
}
