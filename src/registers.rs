//! MAX7219 register map.

/// Command registers of the MAX7219 display driver.
///
/// Each chip in the chain receives a 16-bit packet: register address followed
/// by one data byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    NoOp = 0x00,
    Digit0 = 0x01,
    Digit1 = 0x02,
    Digit2 = 0x03,
    Digit3 = 0x04,
    Digit4 = 0x05,
    Digit5 = 0x06,
    Digit6 = 0x07,
    Digit7 = 0x08,
    DecodeMode = 0x09,
    Intensity = 0x0A,
    ScanLimit = 0x0B,
    Shutdown = 0x0C,
    DisplayTest = 0x0F,
}

impl Register {
    /// Raw register address as sent on the wire.
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Digit register for a matrix row (0..8).
    ///
    /// Rows map to DIG0..DIG7; out-of-range rows saturate to DIG7, but
    /// callers iterate `0..MATRIX_ROWS` so that case does not arise in
    /// practice.
    pub const fn digit(row: usize) -> Self {
        match row {
            0 => Self::Digit0,
            1 => Self::Digit1,
            2 => Self::Digit2,
            3 => Self::Digit3,
            4 => Self::Digit4,
            5 => Self::Digit5,
            6 => Self::Digit6,
            _ => Self::Digit7,
        }
    }
}
