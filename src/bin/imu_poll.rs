// imu-poll -- polls Euler angles and the quaternion from a serial IMU and
// prints each reading.
//
// Usage:
//   imu-poll --port /dev/ttyUSB0
//   imu-poll --port /dev/ttyACM0 --baud 921600 --cycles 0 --interval-ms 20
//   imu-poll --max-consecutive-errors 50
//   RUST_LOG=imu_ascii=trace imu-poll

use std::fmt;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use imu_ascii::port::{PortConfig, SerialInterface, DEFAULT_BAUD_RATE, DEFAULT_PORT};
use imu_ascii::{ExchangeConfig, ExchangeEngine, ExchangeError};

/// Poll an ASCII-protocol IMU over a serial port.
#[derive(Parser, Debug)]
#[command(name = "imu-poll", version, about)]
struct Cli {
    /// Serial port path (e.g. /dev/ttyUSB0, COM3).
    #[arg(long, default_value = DEFAULT_PORT)]
    port: String,

    /// Baud rate.
    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Number of poll cycles; 0 polls until interrupted.
    #[arg(long, default_value_t = 1000)]
    cycles: u64,

    /// Pause between cycles in milliseconds.
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,

    /// Reply window per command in milliseconds.
    #[arg(long, default_value_t = 30)]
    timeout_ms: u64,

    /// Stop after this many failed exchanges in a row; 0 never stops.
    #[arg(long, default_value_t = 0)]
    max_consecutive_errors: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let port_config = PortConfig {
        path: cli.port.clone(),
        baud_rate: cli.baud,
    };
    let interface = SerialInterface::open(&port_config)
        .with_context(|| format!("failed to open serial port {}", cli.port))?;
    info!(port = %cli.port, baud = cli.baud, "serial port open");

    let exchange_config = ExchangeConfig {
        response_timeout: Duration::from_millis(cli.timeout_ms),
        ..ExchangeConfig::default()
    };
    let mut engine = ExchangeEngine::with_config(interface, exchange_config);

    let interval = Duration::from_millis(cli.interval_ms);
    let mut streak = ErrorStreak::new(cli.max_consecutive_errors);
    let mut cycle = 0u64;
    while cli.cycles == 0 || cycle < cli.cycles {
        // A failed, short or missing reply just skips this cycle; the next poll tries again
        if let Some(e) = settle(engine.read_euler(), "Euler angles", &mut streak)? {
            println!("Euler angle = {:.6}, {:.6}, {:.6}", e.roll, e.pitch, e.yaw);
        }

        if let Some(q) = settle(engine.read_quaternion(), "quaternion", &mut streak)? {
            let [a, b, c, d] = q.components;
            println!("Quaternion = {a:.6}, {b:.6}, {c:.6}, {d:.6}");
        }

        cycle += 1;
        thread::sleep(interval);
    }

    // Port closes when the engine is dropped
    drop(engine);
    Ok(())
}

/// Counts failed exchanges in a row against an optional limit.
#[derive(Debug)]
struct ErrorStreak {
    limit: u32,
    current: u32,
}

impl ErrorStreak {
    fn new(limit: u32) -> Self {
        ErrorStreak { limit, current: 0 }
    }

    fn success(&mut self) {
        self.current = 0;
    }

    /// Records a failure; true once the limit is reached.
    fn failure(&mut self) -> bool {
        self.current = self.current.saturating_add(1);
        self.limit != 0 && self.current >= self.limit
    }
}

/// Every exchange error is logged and skips the reading. The run only ends
/// once the streak limit is hit.
fn settle<T, E: fmt::Debug>(
    result: Result<Option<T>, ExchangeError<E>>,
    what: &str,
    streak: &mut ErrorStreak,
) -> Result<Option<T>> {
    match result {
        Ok(reading) => {
            streak.success();
            Ok(reading)
        }
        Err(err) => {
            warn!(error = %err, reading = what, "exchange failed, skipping cycle");
            if streak.failure() {
                bail!("reading {what}: {} exchanges failed in a row, last: {err}", streak.current);
            }
            Ok(None)
        }
    }
}
