// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)] // no_std unless std is requested

pub mod common;
pub mod exchange;

#[cfg(feature = "std")]
pub mod port;

// Re-export key types for convenience
pub use common::{Command, ExchangeError};
pub use exchange::{ExchangeConfig, ExchangeEngine, ExchangeReport, FrameOutcome};
