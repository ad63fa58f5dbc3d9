//! MAX7219 matrix-chain driver
//!
//! Serializes commands and frame rows to a daisy chain of MAX7219 chips over
//! an `embedded-hal` [`SpiDevice`]. Every write is one scoped bus transaction:
//! the `SpiDevice` contract asserts chip-select before the bytes go out and
//! releases it on every exit path, including transfer failure.

use core::fmt;

use embedded_hal::spi::{Error as _, ErrorKind, SpiDevice};

use crate::config::DisplayConfig;
use crate::frame::FrameBuffer;
use crate::registers::Register;
use crate::{MATRIX_ROWS, MAX_MATRICES};

/// Transient bus failure.
///
/// The driver never retries; the scheduling loop decides whether to skip the
/// frame or escalate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    Bus(ErrorKind),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(kind) => write!(f, "SPI bus error: {kind:?}"),
        }
    }
}

impl core::error::Error for DriverError {}

/// Driver for a daisy chain of MAX7219 LED matrices.
///
/// Chain convention: the first packet written is shifted to the chip furthest
/// from the controller, so one `write` of `num_matrices` packets latches the
/// whole chain at once.
pub struct MatrixChain<SPI> {
    spi: SPI,
    buffer: [u8; MAX_MATRICES * 2],
    num_matrices: usize,
}

impl<SPI> MatrixChain<SPI>
where
    SPI: SpiDevice,
{
    /// Create a driver for the chain length in `config`.
    ///
    /// The SPI device must run mode 0 at 10 MHz or less, per the MAX7219
    /// datasheet. Chip-select belongs to the `SpiDevice`.
    pub fn new(spi: SPI, config: &DisplayConfig) -> Self {
        Self {
            spi,
            buffer: [0; MAX_MATRICES * 2],
            num_matrices: config.num_matrices() as usize,
        }
    }

    /// Number of chips on the chain.
    pub const fn num_matrices(&self) -> usize {
        self.num_matrices
    }

    /// Run the power-up sequence and blank the chain.
    ///
    /// Order matters: the chips wake in shutdown, test mode is cleared, all 8
    /// rows are enabled with raw (no-decode) addressing, intensity is set,
    /// then shutdown is released.
    pub fn init(&mut self, brightness: u8) -> Result<(), DriverError> {
        self.broadcast(Register::Shutdown, 0)?;
        self.broadcast(Register::DisplayTest, 0)?;
        self.broadcast(Register::ScanLimit, 7)?;
        self.broadcast(Register::DecodeMode, 0)?;
        self.broadcast(Register::Intensity, brightness)?;
        self.broadcast(Register::Shutdown, 1)?;
        self.blank()
    }

    /// Send one `(register, data)` command to every chip in a single
    /// transaction.
    pub fn broadcast(&mut self, register: Register, data: u8) -> Result<(), DriverError> {
        for chip in 0..self.num_matrices {
            self.buffer[chip * 2] = register.addr();
            self.buffer[chip * 2 + 1] = data;
        }
        self.write_packets()
    }

    /// Transmit a complete frame, one transaction per row.
    ///
    /// Each row transaction carries one `(digit, column-byte)` packet per
    /// chip. The frame length always matches the chain length, both come
    /// from the same validated config.
    pub fn flush(&mut self, frame: &FrameBuffer) -> Result<(), DriverError> {
        for row in 0..MATRIX_ROWS {
            let digit = Register::digit(row).addr();
            for (chip, &data) in frame.row_data(row).iter().enumerate() {
                self.buffer[chip * 2] = digit;
                self.buffer[chip * 2 + 1] = data;
            }
            self.write_packets()?;
        }
        Ok(())
    }

    /// Apply a global intensity level to the whole chain.
    ///
    /// Exactly one bus write. The value was validated at config time and is
    /// only forwarded here.
    pub fn set_brightness(&mut self, level: u8) -> Result<(), DriverError> {
        self.broadcast(Register::Intensity, level)
    }

    /// Turn every LED off without touching any frame buffer.
    pub fn blank(&mut self) -> Result<(), DriverError> {
        for row in 0..MATRIX_ROWS {
            self.broadcast(Register::digit(row), 0)?;
        }
        Ok(())
    }

    fn write_packets(&mut self) -> Result<(), DriverError> {
        let len = self.num_matrices * 2;
        self.spi
            .write(&self.buffer[..len])
            .map_err(|e| DriverError::Bus(e.kind()))
    }
}
