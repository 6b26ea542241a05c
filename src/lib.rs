//! Framebuffer and drawing primitives for WS2801 LED matrix walls.
//!
//! ## How WS2801 LED strips work
//!
//! WS2801 strips are chains of constant-current LED drivers wired as one long
//! shift register. Unlike the single-wire WS2812, the WS2801 has separate
//! clock and data lines and behaves like an ordinary SPI peripheral:
//!
//! - **DATA** – Serial colour data, one byte per channel, most-significant
//!   bit first
//! - **CLK** – Shift clock; every rising edge pushes one bit down the chain
//!
//! Each driver swallows the first 24 bits it sees (8 bits red, 8 bits green,
//! 8 bits blue) and forwards everything after that to the next driver in the
//! chain. To paint a strand of N LEDs the controller simply clocks out
//! 3 × N bytes. There is no address line and no latch pin: holding the clock
//! LOW for around a millisecond is the **latch** – it tells every driver to
//! transfer its shift register to the LED outputs and arm itself for the
//! next frame.
//!
//! Because the protocol is plain SPI mode 0 at ≤ 1 MHz, the transmission
//! sink in this crate is an [`embedded_hal::spi::SpiBus`] plus an
//! [`embedded_hal::delay::DelayNs`] for the latch, and the pixel data is
//! kept in a flat channel-byte array that can also be handed to a DMA
//! engine via [`embedded_dma::ReadBuffer`].
//!
//! ## Serpentine walls
//!
//! A matrix built from one continuous strip zig-zags: the strip runs left to
//! right across the first row, turns around, runs right to left across the
//! second, and so on. Pixel 0 of row 1 is therefore on the *right* edge of
//! the panel. The [`serpentine_index`] transform hides this wiring so that
//! every layer above the buffer reasons in plain `(row, col)` grid
//! coordinates:
//!
//! ```text
//! row 0:   0 →  1 →  2 →  3
//! row 1:   7 ←  6 ←  5 ←  4
//! row 2:   8 →  9 → 10 → 11
//! ```
//!
//! ## Components
//!
//! - [`buffer::PixelBuffer`] – the strip-level framebuffer: owns the channel
//!   bytes, implements the serpentine transform and the raw transmission.
//! - [`drawable::Drawable`] – a positionable local pixel buffer that can be
//!   composited onto the framebuffer with transparency, plus the
//!   [`drawable::Drawable::crawl`] scrolling operation.
//! - [`glyphs`] – drawables seeded from a sparse character pattern table.
//! - [`shapes`] – stateless rasterizers (line, rectangle, disk, circle)
//!   writing straight into the grid.
//! - [`effects`] – incremental background effects with explicit per-effect
//!   state.
//!
//! ## Coordinate conventions
//!
//! All drawing-facing APIs use matrix notation: row first, then column, with
//! `(0, 0)` in the top-left corner. Out-of-range writes are silently
//! dropped and out-of-range reads return 0 – on a resource-constrained
//! target a malformed draw call must never corrupt adjacent memory, and
//! there is no exception machinery to lean on. Callers must treat 0 as both
//! "black" and "unset/out of range".
//!
//! ## Available Feature Flags
//!
//! ### `defmt` Feature
//! Implements `defmt::Format` for framebuffer types so they can be emitted
//! with the `defmt` logging framework. No functional changes; purely adds a
//! trait impl.
#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

use bitfield::bitfield;

pub mod buffer;
pub mod drawable;
pub mod effects;
pub mod glyphs;
pub mod shapes;

/// Number of channel bytes shifted out per LED (red, green, blue).
pub const BYTES_PER_LED: usize = 3;

/// Computes the channel-byte buffer size for a panel
///
/// # Arguments
///
/// * `rows` - Total number of rows in the panel
/// * `cols` - Number of columns in the panel
///
/// # Returns
///
/// Number of bytes needed internally for `PixelBuffer`
#[must_use]
pub const fn compute_bytes(rows: usize, cols: usize) -> usize {
    rows * cols * BYTES_PER_LED
}

/// Maps a `(row, col)` grid coordinate to a linear LED index on the strip.
///
/// Even rows run in ascending column order, odd rows run in reverse,
/// mirroring the physical wiring where the strip snakes back and forth
/// across the wall.
///
/// The caller is responsible for `row` and `col` being in range; the result
/// for out-of-range inputs is a valid index into some *other* row, which is
/// why [`buffer::PixelBuffer`] bounds-checks before calling this.
#[must_use]
pub const fn serpentine_index(cols: usize, row: usize, col: usize) -> usize {
    if row % 2 == 0 {
        cols * row + col
    } else {
        cols * row + (cols - 1 - col)
    }
}

bitfield! {
    /// Packed 24-bit colour word in `0xRRGGBB` order.
    ///
    /// This is the representation used at every public boundary; the
    /// physical channel order of the strip is resolved at write time inside
    /// the buffer and never leaks out. The all-zero word doubles as the
    /// "transparent / unset" sentinel for compositing.
    ///
    /// The bit layout is as follows:
    /// - Bits 23-16: Red channel
    /// - Bits 15-8: Green channel
    /// - Bits 7-0: Blue channel
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    #[repr(transparent)]
    struct Rgb24(u32);
    impl Debug;
    pub u8, red, set_red: 23, 16;
    pub u8, green, set_green: 15, 8;
    pub u8, blue, set_blue: 7, 0;
}

/// Packs three 8-bit channels into one 24-bit `0xRRGGBB` colour word.
#[must_use]
pub const fn color(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Red channel of a packed colour word.
#[must_use]
pub fn red(c: u32) -> u8 {
    Rgb24(c).red()
}

/// Green channel of a packed colour word.
#[must_use]
pub fn green(c: u32) -> u8 {
    Rgb24(c).green()
}

/// Blue channel of a packed colour word.
#[must_use]
pub fn blue(c: u32) -> u8 {
    Rgb24(c).blue()
}

/// Channel order expected by the LED drivers on the strip.
///
/// Some WS2801 batches are wired green-before-red. The order only affects
/// how packed colours are split into channel bytes at write time; packed
/// values passed in or out are always `0xRRGGBB`. Changing the order on a
/// live buffer does *not* reformat bytes already written – the caller
/// should clear or repaint the buffer afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorOrder {
    /// Red, green, blue – the common wiring.
    #[default]
    Rgb,
    /// Green, red, blue.
    Grb,
}

/// Grid-coordinate pixel access.
///
/// This is the seam between the strip-level buffer and everything drawn on
/// top of it: drawables, shape rasterizers and background effects all
/// target `impl PixelGrid` and never see linear strip indices.
pub trait PixelGrid {
    /// Number of rows in the grid.
    fn rows(&self) -> usize;

    /// Number of columns in the grid.
    fn cols(&self) -> usize;

    /// Write a packed colour at a grid coordinate.
    ///
    /// Out-of-range coordinates (negative included) are silently dropped.
    fn set_grid(&mut self, row: i32, col: i32, color: u32);

    /// Read the packed colour at a grid coordinate.
    ///
    /// Returns 0 for out-of-range coordinates, indistinguishable from a
    /// black or unset pixel.
    fn get_grid(&self, row: i32, col: i32) -> u32;
}
