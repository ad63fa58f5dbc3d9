//! Frame buffer and frame sources
//!
//! A [`FrameBuffer`] holds one complete display state: one column byte per
//! matrix for each of the 8 rows. The logical width is fixed when the buffer
//! is created and never changes afterwards.

use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::{MATRIX_ROWS, MAX_MATRICES};

/// One frame of per-matrix row data.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    rows: [[u8; MAX_MATRICES]; MATRIX_ROWS],
    num_matrices: usize,
}

impl FrameBuffer {
    /// Create a cleared buffer for `num_matrices` chained matrices.
    ///
    /// `num_matrices` comes from a validated [`DisplayConfig`](crate::DisplayConfig),
    /// so it is always within `1..=MAX_MATRICES`.
    pub const fn new(num_matrices: u8) -> Self {
        Self {
            rows: [[0; MAX_MATRICES]; MATRIX_ROWS],
            num_matrices: num_matrices as usize,
        }
    }

    /// Number of matrices this buffer addresses.
    pub const fn num_matrices(&self) -> usize {
        self.num_matrices
    }

    /// Display width in pixels (8 columns per matrix).
    pub const fn width(&self) -> usize {
        self.num_matrices * 8
    }

    /// Set a single pixel. Out-of-range coordinates are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        if x >= self.width() || y >= MATRIX_ROWS {
            return;
        }
        let matrix = x / 8;
        let mask = 1 << (7 - (x % 8));
        if on {
            self.rows[y][matrix] |= mask;
        } else {
            self.rows[y][matrix] &= !mask;
        }
    }

    /// Read a single pixel. Out-of-range coordinates read as off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= self.width() || y >= MATRIX_ROWS {
            return false;
        }
        self.rows[y][x / 8] & (1 << (7 - (x % 8))) != 0
    }

    /// Column bytes for one row, one byte per matrix.
    pub fn row_data(&self, row: usize) -> &[u8] {
        &self.rows[row][..self.num_matrices]
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.rows = [[0; MAX_MATRICES]; MATRIX_ROWS];
    }
}

/// Source of animation frames.
///
/// The scheduler pulls one frame per tick; implementations mutate the buffer
/// in place. Pattern generation is pluggable so hosts can substitute their
/// own animations.
pub trait FrameSource {
    /// Produce the next frame into `frame`.
    fn next_frame(&mut self, frame: &mut FrameBuffer);

    /// Reset any internal animation state.
    fn reset(&mut self) {}
}

/// Random blinkenlights pattern.
///
/// Each tick, every pixel has a 50% chance of being rewritten to a random
/// state, producing the classic movie-computer twinkle.
#[derive(Debug, Clone)]
pub struct BlinkenPattern {
    rng: SmallRng,
}

impl BlinkenPattern {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl FrameSource for BlinkenPattern {
    fn next_frame(&mut self, frame: &mut FrameBuffer) {
        for y in 0..MATRIX_ROWS {
            for x in 0..frame.width() {
                let bits = self.rng.next_u32();
                if bits & 1 == 0 {
                    frame.set_pixel(x, y, bits & 2 != 0);
                }
            }
        }
    }
}
