//! Incremental background effects.
//!
//! An effect is a plain state struct advanced one visible step at a time
//! from the control loop; the caller owns frame pacing and transmission.
//! Each effect carries exactly the state it needs – there is no shared
//! engine and no untyped scratch storage.
//!
//! ```rust
//! use ws2801_framebuffer::buffer::PixelBuffer;
//! use ws2801_framebuffer::effects::ColorWipe;
//! use ws2801_framebuffer::{color, compute_bytes};
//!
//! let mut board = PixelBuffer::<5, 5, { compute_bytes(5, 5) }>::default();
//! let mut wipe = ColorWipe::new();
//! while !wipe.step(&mut board, color(0, 0, 255)) {
//!     // transmit the board, wait a frame
//! }
//! ```

use crate::PixelGrid;

/// Paints the grid one cell per step, in row-major order, until every cell
/// holds the wipe colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorWipe {
    next: usize,
}

impl ColorWipe {
    /// A wipe poised at the top-left cell.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Rewind so the wipe can run again.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Number of cells painted so far.
    #[must_use]
    pub const fn cells_painted(&self) -> usize {
        self.next
    }

    /// Paint the next cell.
    ///
    /// Returns `true` once the whole board has been covered; further calls
    /// are no-ops. The caller transmits the board and paces frames between
    /// steps.
    pub fn step(&mut self, board: &mut impl PixelGrid, color: u32) -> bool {
        let total = board.rows() * board.cols();
        if self.next >= total {
            return true;
        }
        let cols = board.cols();
        board.set_grid((self.next / cols) as i32, (self.next % cols) as i32, color);
        self.next += 1;
        self.next >= total
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::{color, compute_bytes};

    const ROWS: usize = 3;
    const COLS: usize = 4;

    type TestBoard = PixelBuffer<ROWS, COLS, { compute_bytes(ROWS, COLS) }>;

    const C: u32 = color(0, 0, 255);

    #[test]
    fn test_wipe_covers_the_board_in_row_major_order() {
        let mut board = TestBoard::default();
        let mut wipe = ColorWipe::new();

        for step in 0..ROWS * COLS {
            assert_eq!(wipe.cells_painted(), step);
            let done = wipe.step(&mut board, C);
            assert_eq!(done, step == ROWS * COLS - 1);

            // Exactly the first `step + 1` cells in row-major order are lit
            for cell in 0..ROWS * COLS {
                let expected = if cell <= step { C } else { 0 };
                assert_eq!(
                    board.get_grid((cell / COLS) as i32, (cell % COLS) as i32),
                    expected,
                    "cell {cell} after step {step}"
                );
            }
        }
    }

    #[test]
    fn test_step_after_done_is_a_no_op() {
        let mut board = TestBoard::default();
        let mut wipe = ColorWipe::new();
        while !wipe.step(&mut board, C) {}

        assert!(wipe.step(&mut board, 0xFF0000));
        assert_eq!(wipe.cells_painted(), ROWS * COLS);
        // Nothing was repainted
        assert_eq!(board.get_grid(0, 0), C);
    }

    #[test]
    fn test_reset_runs_the_wipe_again() {
        let mut board = TestBoard::default();
        let mut wipe = ColorWipe::new();
        while !wipe.step(&mut board, C) {}

        wipe.reset();
        assert_eq!(wipe.cells_painted(), 0);
        assert!(!wipe.step(&mut board, 0xFF0000));
        assert_eq!(board.get_grid(0, 0), 0xFF0000);
        assert_eq!(board.get_grid(0, 1), C);
    }
}
