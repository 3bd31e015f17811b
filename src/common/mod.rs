// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod payload;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{Command, COMMAND_TERMINATOR, MAX_COMMAND_NAME_LEN};

// From error.rs
pub use error::{CommandError, DeviceMessage, ExchangeError};

// From frame.rs
pub use frame::{FrameKind, ResponseFrame, FRAME_CAPACITY};

// From hal_traits.rs
pub use hal_traits::{ExchangeTimer, ImuInstant, ImuSerial};

// From payload.rs
pub use payload::{parse_values, ScanStop, ValueScan};

// From timing.rs (constants - users can access via common::timing::*)

// From types.rs
pub use types::{scan_value, EulerAngles, Quaternion};
