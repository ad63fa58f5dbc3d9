//! Display configuration
//!
//! All parameters are validated once when the config is built; the driver and
//! scheduler consume an already-valid [`DisplayConfig`] and never re-check.

use core::fmt;

use embassy_time::Duration;

use crate::MAX_MATRICES;

/// Default chain length.
pub const DEFAULT_NUM_MATRICES: u8 = 12;
/// Default MAX7219 intensity.
pub const DEFAULT_BRIGHTNESS: u8 = 0;
/// Default shortest animation interval.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(333);
/// Default longest animation interval.
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_millis(1332);

/// Highest MAX7219 intensity value.
pub const MAX_BRIGHTNESS: u8 = 15;

/// Rejected configuration parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Chain length outside `1..=32`.
    InvalidMatrixCount(u8),
    /// Intensity outside `0..=15`.
    InvalidBrightness(u8),
    /// An interval bound of zero.
    ZeroInterval,
    /// Minimum interval longer than maximum.
    IntervalOrder,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMatrixCount(n) => {
                write!(f, "matrix count {n} outside 1..={MAX_MATRICES}")
            }
            Self::InvalidBrightness(b) => {
                write!(f, "brightness {b} outside 0..={MAX_BRIGHTNESS}")
            }
            Self::ZeroInterval => f.write_str("interval bounds must be positive"),
            Self::IntervalOrder => f.write_str("min interval exceeds max interval"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Validated display configuration.
///
/// Built once at the platform boundary and owned by the scheduler for the
/// lifetime of the component. The chip-select line is not part of the config:
/// it belongs to the `SpiDevice` handed to [`MatrixChain`](crate::MatrixChain).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    num_matrices: u8,
    brightness: u8,
    min_interval: Duration,
    max_interval: Duration,
}

impl DisplayConfig {
    /// Validate and build a configuration.
    pub fn new(
        num_matrices: u8,
        brightness: u8,
        min_interval: Duration,
        max_interval: Duration,
    ) -> Result<Self, ConfigError> {
        if num_matrices == 0 || num_matrices as usize > MAX_MATRICES {
            return Err(ConfigError::InvalidMatrixCount(num_matrices));
        }
        if brightness > MAX_BRIGHTNESS {
            return Err(ConfigError::InvalidBrightness(brightness));
        }
        if min_interval.as_ticks() == 0 || max_interval.as_ticks() == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if min_interval > max_interval {
            return Err(ConfigError::IntervalOrder);
        }
        Ok(Self {
            num_matrices,
            brightness,
            min_interval,
            max_interval,
        })
    }

    /// Number of daisy-chained matrices.
    pub const fn num_matrices(&self) -> u8 {
        self.num_matrices
    }

    /// Configured MAX7219 intensity (0..=15).
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Shortest animation interval.
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Longest animation interval.
    pub const fn max_interval(&self) -> Duration {
        self.max_interval
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            num_matrices: DEFAULT_NUM_MATRICES,
            brightness: DEFAULT_BRIGHTNESS,
            min_interval: DEFAULT_MIN_INTERVAL,
            max_interval: DEFAULT_MAX_INTERVAL,
        }
    }
}
