#![no_std]

pub mod channel;
pub mod config;
pub mod driver;
pub mod frame;
pub mod registers;
pub mod scheduler;
pub mod switch;

pub use config::{ConfigError, DisplayConfig};
pub use driver::{DriverError, MatrixChain};
pub use frame::{BlinkenPattern, FrameBuffer, FrameSource};
pub use registers::Register;
pub use scheduler::{
    AnimationScheduler, IntervalPolicy, MAX_CONSECUTIVE_FAILURES, SchedulerState, TickResult,
};
pub use switch::{
    DisplaySwitch, IntentChannel, IntentReceiver, IntentSender, PowerSwitch, SwitchIntent,
};

pub use embassy_time::{Duration, Instant};

/// Maximum number of MAX7219 matrices supported on one chain.
///
/// Chain length is configured at runtime via [`DisplayConfig`]; this constant
/// bounds the statically allocated frame and transfer buffers.
pub const MAX_MATRICES: usize = 32;

/// Rows per matrix (the MAX7219 drives 8 digit lines).
pub const MATRIX_ROWS: usize = 8;
