//! Positionable, composable pixel objects.
//!
//! A [`Drawable`] is a small local pixel buffer (its *bounding box*) with an
//! anchor position in the target grid's coordinate space. Callers compose
//! content in the local buffer, position it, then blit it onto a
//! [`PixelGrid`] – transparently (zero cells leave the target untouched) or
//! opaquely (zero cells overwrite with black). Compositing order is caller
//! controlled: later draws win at overlapping opaque cells, and no drawable
//! needs to know about any other.
//!
//! The bounding box size is fixed at construction – matching the memory
//! discipline of the target hardware – while the position can change freely
//! via [`translate`](Drawable::translate) and
//! [`set_position`](Drawable::set_position). An off-board drawable is legal
//! and simply draws nothing visible; the grid drops the writes.
//!
//! [`Drawable::crawl`] scrolls a set of drawables across a static
//! background, restoring a snapshot of the board between frames so the
//! previous frame's pixels never bleed.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiBus;

use crate::buffer::PixelBuffer;
use crate::PixelGrid;

/// A local pixel buffer with an anchor position in the target grid.
///
/// # Type Parameters
/// - `CAP`: Capacity of the local cell buffer; the runtime
///   `width × height` must fit in it
///
/// Cells hold packed `0xRRGGBB` colours, row-major, with 0 as the
/// transparent/unset sentinel. The anchor (`base_row`, `base_col`) is the
/// top-left corner of the bounding box in the target's coordinates and is
/// signed so a drawable can sit partially (or entirely) off-board.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Drawable<const CAP: usize> {
    base_row: i32,
    base_col: i32,
    width: usize,
    height: usize,
    cells: [u32; CAP],
}

impl<const CAP: usize> Drawable<CAP> {
    /// Create a drawable with an all-transparent `width × height` bounding
    /// box anchored at (`base_row`, `base_col`).
    ///
    /// If `width × height` exceeds `CAP` the drawable degrades to zero
    /// size instead of panicking: every subsequent cell write and draw is a
    /// no-op. Size cannot change after construction; only the position can.
    #[must_use]
    pub const fn new(base_row: i32, base_col: i32, width: usize, height: usize) -> Self {
        let fits = match width.checked_mul(height) {
            Some(cells) => cells <= CAP,
            None => false,
        };
        let (width, height) = if fits { (width, height) } else { (0, 0) };
        Self {
            base_row,
            base_col,
            width,
            height,
            cells: [0; CAP],
        }
    }

    /// Width of the bounding box.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height of the bounding box.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Row of the top-left anchor in the target's coordinates.
    #[must_use]
    pub const fn base_row(&self) -> i32 {
        self.base_row
    }

    /// Column of the top-left anchor in the target's coordinates.
    #[must_use]
    pub const fn base_col(&self) -> i32 {
        self.base_col
    }

    /// Shift the anchor by a relative offset.
    ///
    /// No bounds checking: keeping the drawable on-board is the caller's
    /// business, and an off-board drawable just draws nothing visible.
    pub fn translate(&mut self, delta_row: i32, delta_col: i32) {
        self.base_row += delta_row;
        self.base_col += delta_col;
    }

    /// Set the anchor absolutely.
    pub fn set_position(&mut self, row: i32, col: i32) {
        self.base_row = row;
        self.base_col = col;
    }

    /// Write a packed colour into the local buffer.
    ///
    /// Coordinates outside the bounding box are silently dropped.
    pub fn set_local_pixel(&mut self, row: usize, col: usize, color: u32) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = color;
        }
    }

    /// Read a local cell; 0 for coordinates outside the bounding box.
    #[must_use]
    pub fn get_local_pixel(&self, row: usize, col: usize) -> u32 {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col]
        } else {
            0
        }
    }

    /// Recolour the drawing without changing its shape: every non-zero cell
    /// takes `color`, transparent cells stay transparent.
    pub fn set_color(&mut self, color: u32) {
        for cell in &mut self.cells[..self.width * self.height] {
            if *cell != 0 {
                *cell = color;
            }
        }
    }

    /// Blit onto the target, skipping transparent (zero) cells.
    pub fn draw(&self, target: &mut impl PixelGrid) {
        self.blit(target, true);
    }

    /// Blit onto the target, writing every cell including zeros – an
    /// explicit black overwrite of the whole bounding box.
    pub fn draw_opaque(&self, target: &mut impl PixelGrid) {
        self.blit(target, false);
    }

    fn blit(&self, target: &mut impl PixelGrid, transparent: bool) {
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.cells[row * self.width + col];
                if transparent && cell == 0 {
                    continue;
                }
                target.set_grid(
                    self.base_row + row as i32,
                    self.base_col + col as i32,
                    cell,
                );
            }
        }
    }

    /// Scroll a set of drawables across the board.
    ///
    /// Snapshots the whole board, then for each of `frames` iterations:
    /// restores the snapshot (undoing the previous frame's drawable
    /// pixels), draws every drawable in sequence order (later ones win at
    /// overlaps), transmits the board, translates every drawable by
    /// (`delta_row`, `delta_col`) and waits `wait_ms`.
    ///
    /// The board must not already have any of `drawables` rendered on it –
    /// the snapshot is taken as-is, so pre-drawn drawables would become
    /// part of the "static" background and smear.
    ///
    /// # Errors
    /// Propagates any error from the SPI bus.
    pub fn crawl<SPI, D, const ROWS: usize, const COLS: usize, const BYTES: usize>(
        board: &mut PixelBuffer<ROWS, COLS, BYTES>,
        spi: &mut SPI,
        delay: &mut D,
        drawables: &mut [Self],
        delta_row: i32,
        delta_col: i32,
        frames: usize,
        wait_ms: u32,
    ) -> Result<(), SPI::Error>
    where
        SPI: SpiBus,
        D: DelayNs,
    {
        let mut background = [[0_u32; COLS]; ROWS];
        for (row, line) in background.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                *cell = board.get_grid(row as i32, col as i32);
            }
        }

        for _ in 0..frames {
            for (row, line) in background.iter().enumerate() {
                for (col, cell) in line.iter().enumerate() {
                    board.set_grid(row as i32, col as i32, *cell);
                }
            }
            for drawable in drawables.iter() {
                drawable.draw(board);
            }
            board.transmit(spi, delay)?;
            for drawable in drawables.iter_mut() {
                drawable.translate(delta_row, delta_col);
            }
            delay.delay_ms(wait_ms);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;
    use crate::{color, compute_bytes};
    use core::convert::Infallible;

    const TEST_ROWS: usize = 5;
    const TEST_COLS: usize = 5;
    const TEST_BYTES: usize = compute_bytes(TEST_ROWS, TEST_COLS);

    type TestBoard = PixelBuffer<TEST_ROWS, TEST_COLS, TEST_BYTES>;

    struct RecordingSpi {
        written: Vec<u8>,
    }

    impl embedded_hal::spi::ErrorType for RecordingSpi {
        type Error = Infallible;
    }

    impl SpiBus for RecordingSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            self.written.extend_from_slice(words);
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn cross() -> Drawable<9> {
        // . X .
        // X X X
        // . X .
        let mut d = Drawable::<9>::new(0, 0, 3, 3);
        d.set_local_pixel(0, 1, color(255, 0, 0));
        d.set_local_pixel(1, 0, color(255, 0, 0));
        d.set_local_pixel(1, 1, color(255, 0, 0));
        d.set_local_pixel(1, 2, color(255, 0, 0));
        d.set_local_pixel(2, 1, color(255, 0, 0));
        d
    }

    #[test]
    fn test_transparent_draw_skips_zero_cells() {
        let mut board = TestBoard::default();
        board.set_grid(0, 0, 0x00FF00);
        board.set_grid(1, 1, 0x00FF00);

        cross().draw(&mut board);

        // Corner cell of the cross is transparent: background survives
        assert_eq!(board.get_grid(0, 0), 0x00FF00);
        // Centre cell is opaque: background overwritten
        assert_eq!(board.get_grid(1, 1), 0xFF0000);
        assert_eq!(board.get_grid(0, 1), 0xFF0000);
    }

    #[test]
    fn test_opaque_draw_overwrites_with_black() {
        let mut board = TestBoard::default();
        board.set_grid(0, 0, 0x00FF00);

        cross().draw_opaque(&mut board);

        assert_eq!(board.get_grid(0, 0), 0);
        assert_eq!(board.get_grid(1, 1), 0xFF0000);
    }

    #[test]
    fn test_later_draw_wins_at_overlaps() {
        let mut board = TestBoard::default();
        let mut first = cross();
        first.set_color(0x0000FF);
        let second = cross();

        first.draw(&mut board);
        second.draw(&mut board);

        assert_eq!(board.get_grid(1, 1), 0xFF0000);
    }

    #[test]
    fn test_set_color_preserves_shape() {
        let mut d = cross();
        d.set_color(0x123456);

        assert_eq!(d.get_local_pixel(1, 1), 0x123456);
        assert_eq!(d.get_local_pixel(0, 1), 0x123456);
        // Transparent cells stay transparent
        assert_eq!(d.get_local_pixel(0, 0), 0);
        assert_eq!(d.get_local_pixel(2, 2), 0);
    }

    #[test]
    fn test_translate_and_set_position() {
        let mut d = cross();
        d.translate(2, -1);
        assert_eq!((d.base_row(), d.base_col()), (2, -1));
        d.translate(-4, 0);
        assert_eq!((d.base_row(), d.base_col()), (-2, -1));
        d.set_position(1, 1);
        assert_eq!((d.base_row(), d.base_col()), (1, 1));
    }

    #[test]
    fn test_off_board_draw_is_silent() {
        let mut board = TestBoard::default();
        let mut d = cross();
        d.set_position(-1, TEST_COLS as i32 - 1);
        d.draw(&mut board);

        // Only the left arm of the cross lands on the board
        assert_eq!(board.get_grid(0, TEST_COLS as i32 - 1), 0xFF0000);
        // Everything else stayed black
        let lit = (0..TEST_ROWS as i32)
            .flat_map(|r| (0..TEST_COLS as i32).map(move |c| (r, c)))
            .filter(|&(r, c)| board.get_grid(r, c) != 0)
            .count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn test_local_writes_outside_bounding_box_are_dropped() {
        let mut d = cross();
        let before = d;
        d.set_local_pixel(3, 0, 0xFFFFFF);
        d.set_local_pixel(0, 3, 0xFFFFFF);
        assert_eq!(d.cells, before.cells);
        assert_eq!(d.get_local_pixel(3, 0), 0);
    }

    #[test]
    fn test_oversized_construction_degrades_to_zero_size() {
        let mut d = Drawable::<4>::new(0, 0, 3, 3);
        assert_eq!(d.width(), 0);
        assert_eq!(d.height(), 0);

        // Every operation is a no-op from here on
        d.set_local_pixel(0, 0, 0xFFFFFF);
        assert_eq!(d.get_local_pixel(0, 0), 0);

        let mut board = TestBoard::default();
        d.draw_opaque(&mut board);
        assert!((0..TEST_ROWS as i32)
            .flat_map(|r| (0..TEST_COLS as i32).map(move |c| (r, c)))
            .all(|(r, c)| board.get_grid(r, c) == 0));
    }

    #[test]
    fn test_crawl_scrolls_and_restores_background() {
        let mut board = TestBoard::default();
        board.set_grid(4, 4, 0x111111);
        board.set_grid(0, 1, 0x222222);

        let mut dot = Drawable::<1>::new(0, 0, 1, 1);
        dot.set_local_pixel(0, 0, 0xABCDEF);
        let mut set = [dot];

        let mut spi = RecordingSpi { written: Vec::new() };
        let mut delay = NoopDelay;
        Drawable::crawl(&mut board, &mut spi, &mut delay, &mut set, 0, 1, 3, 0).unwrap();

        // Three frames were transmitted
        assert_eq!(spi.written.len(), 3 * TEST_BYTES);

        // After three frames the drawable has moved three columns right
        assert_eq!((set[0].base_row(), set[0].base_col()), (0, 3));

        // The last transmitted frame shows it at (0, 2), over the restored
        // background everywhere else
        assert_eq!(board.get_grid(0, 2), 0xABCDEF);
        assert_eq!(board.get_grid(0, 0), 0);
        assert_eq!(board.get_grid(0, 1), 0x222222);
        assert_eq!(board.get_grid(4, 4), 0x111111);
    }

    #[test]
    fn test_crawl_does_not_smear_previous_frames() {
        let mut board = TestBoard::default();

        let mut dot = Drawable::<1>::new(2, 0, 1, 1);
        dot.set_local_pixel(0, 0, 0xFF00FF);
        let mut set = [dot];

        let mut spi = RecordingSpi { written: Vec::new() };
        let mut delay = NoopDelay;
        Drawable::crawl(&mut board, &mut spi, &mut delay, &mut set, 0, 1, 4, 0).unwrap();

        // Final board: exactly one lit pixel, at the last drawn position
        let lit: Vec<(i32, i32)> = (0..TEST_ROWS as i32)
            .flat_map(|r| (0..TEST_COLS as i32).map(move |c| (r, c)))
            .filter(|&(r, c)| board.get_grid(r, c) != 0)
            .collect();
        assert_eq!(lit.as_slice(), &[(2, 3)]);
    }
}
