//! Strip-level framebuffer for WS2801 serpentine LED walls.
//!
//! [`PixelBuffer`] owns the channel bytes for every LED on the strip and is
//! the only type in the crate that knows about the physical wiring: the
//! serpentine `(row, col)` transform, the RGB/GRB channel order and the
//! transmission protocol all live here. Everything above it draws through
//! the [`PixelGrid`] trait in plain grid coordinates.
//!
//! # Memory Layout
//! Pixels are stored as 3 channel bytes per LED, in *strip* order – the
//! serpentine mapping is baked into stored positions at write time, so
//! transmission is a single linear pass over the buffer. The channel order
//! ([`ColorOrder`]) is likewise resolved at write time; packed colours at
//! the API boundary are always `0xRRGGBB`.
//!
//! # Transmission
//! [`PixelBuffer::transmit`] clocks the whole buffer out over an
//! [`SpiBus`] (WS2801 is plain SPI mode 0, MSB first, ≤ 1 MHz) and then
//! holds the bus idle for one millisecond – the WS2801 latches a frame when
//! its clock stays low. The buffer also implements
//! [`embedded_dma::ReadBuffer`] so the same bytes can be handed to a DMA
//! engine instead.
//!
//! # Example
//! ```rust
//! use ws2801_framebuffer::buffer::PixelBuffer;
//! use ws2801_framebuffer::{color, compute_bytes, ColorOrder, PixelGrid};
//!
//! // An 18 wide, 11 tall wall
//! const ROWS: usize = 11;
//! const COLS: usize = 18;
//! const BYTES: usize = compute_bytes(ROWS, COLS);
//!
//! let mut fb = PixelBuffer::<ROWS, COLS, BYTES>::new(ColorOrder::Rgb);
//! fb.set_grid(10, 17, color(255, 0, 0));
//! assert_eq!(fb.get_grid(10, 17), 0xFF0000);
//! ```

use core::convert::Infallible;

use embedded_dma::ReadBuffer;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{OriginDimensions, RgbColor, Size};
use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiBus;

use crate::{color, compute_bytes, serpentine_index, ColorOrder, PixelGrid, Rgb24, BYTES_PER_LED};

/// How long the clock must stay low for the drivers to latch a frame.
const LATCH_MS: u32 = 1;

/// Framebuffer for a WS2801 strip wired as a serpentine grid.
///
/// # Type Parameters
/// - `ROWS`: Total number of rows in the panel
/// - `COLS`: Number of columns in the panel
/// - `BYTES`: Channel-byte buffer size; must be `compute_bytes(ROWS, COLS)`
///
/// # Helper Functions
/// Use [`compute_bytes`](crate::compute_bytes) to compute the `BYTES`
/// parameter.
///
/// The buffer is allocated once, inline, sized to the panel; there is no
/// resize. [`clear`](Self::clear) is the only re-initialization and drops
/// all pixel data.
#[derive(Clone, Copy)]
pub struct PixelBuffer<const ROWS: usize, const COLS: usize, const BYTES: usize> {
    data: [u8; BYTES],
    order: ColorOrder,
}

impl<const ROWS: usize, const COLS: usize, const BYTES: usize> PixelBuffer<ROWS, COLS, BYTES> {
    /// Create a zeroed framebuffer (all LEDs off).
    ///
    /// # Panics
    /// At construction if `BYTES` does not match `compute_bytes(ROWS, COLS)`;
    /// with `const` arguments this fires at compile time.
    #[must_use]
    pub const fn new(order: ColorOrder) -> Self {
        assert!(BYTES == compute_bytes(ROWS, COLS));
        Self {
            data: [0; BYTES],
            order,
        }
    }

    /// Number of LEDs on the strip.
    #[must_use]
    pub const fn num_pixels(&self) -> usize {
        ROWS * COLS
    }

    /// Turn every LED off.
    ///
    /// This is the explicit re-initialization of the buffer; nothing else
    /// ever drops pixel data wholesale.
    pub fn clear(&mut self) {
        self.data = [0; BYTES];
    }

    /// Change the channel order for subsequent writes.
    ///
    /// Bytes already in the buffer are *not* reformatted to the new order;
    /// the caller should clear or repaint the buffer afterwards.
    pub fn set_order(&mut self, order: ColorOrder) {
        self.order = order;
    }

    /// Current channel order.
    #[must_use]
    pub const fn order(&self) -> ColorOrder {
        self.order
    }

    /// Write a packed `0xRRGGBB` colour at a raw LED strip index.
    ///
    /// Indices at or beyond `num_pixels()` are silently dropped.
    pub fn set_pixel(&mut self, index: usize, color: u32) {
        let word = Rgb24(color);
        self.set_pixel_components(index, word.red(), word.green(), word.blue());
    }

    /// Write separate 8-bit channels at a raw LED strip index.
    ///
    /// Indices at or beyond `num_pixels()` are silently dropped.
    pub fn set_pixel_components(&mut self, index: usize, r: u8, g: u8, b: u8) {
        if index >= ROWS * COLS {
            return;
        }
        let offset = index * BYTES_PER_LED;
        match self.order {
            ColorOrder::Rgb => {
                self.data[offset] = r;
                self.data[offset + 1] = g;
            }
            ColorOrder::Grb => {
                self.data[offset] = g;
                self.data[offset + 1] = r;
            }
        }
        self.data[offset + 2] = b;
    }

    /// Read the packed colour at a raw LED strip index.
    ///
    /// Returns 0 (black) for indices at or beyond `num_pixels()`.
    #[must_use]
    pub fn get_pixel(&self, index: usize) -> u32 {
        if index >= ROWS * COLS {
            return 0;
        }
        let offset = index * BYTES_PER_LED;
        let (r, g) = match self.order {
            ColorOrder::Rgb => (self.data[offset], self.data[offset + 1]),
            ColorOrder::Grb => (self.data[offset + 1], self.data[offset]),
        };
        color(r, g, self.data[offset + 2])
    }

    /// Clock the whole buffer out to the strip and latch it.
    ///
    /// One byte per channel per LED in strip order, MSB first, followed by
    /// the clock-low latch delay. This is the only operation that touches
    /// the transmission sink.
    ///
    /// # Errors
    /// Propagates any error from the SPI bus.
    pub fn transmit<SPI: SpiBus>(
        &self,
        spi: &mut SPI,
        delay: &mut impl DelayNs,
    ) -> Result<(), SPI::Error> {
        spi.write(&self.data)?;
        spi.flush()?;
        delay.delay_ms(LATCH_MS);
        Ok(())
    }
}

impl<const ROWS: usize, const COLS: usize, const BYTES: usize> PixelGrid
    for PixelBuffer<ROWS, COLS, BYTES>
{
    fn rows(&self) -> usize {
        ROWS
    }

    fn cols(&self) -> usize {
        COLS
    }

    fn set_grid(&mut self, row: i32, col: i32, color: u32) {
        if row < 0 || row >= ROWS as i32 || col < 0 || col >= COLS as i32 {
            return;
        }
        self.set_pixel(serpentine_index(COLS, row as usize, col as usize), color);
    }

    fn get_grid(&self, row: i32, col: i32) -> u32 {
        if row < 0 || row >= ROWS as i32 || col < 0 || col >= COLS as i32 {
            return 0;
        }
        self.get_pixel(serpentine_index(COLS, row as usize, col as usize))
    }
}

impl<const ROWS: usize, const COLS: usize, const BYTES: usize> Default
    for PixelBuffer<ROWS, COLS, BYTES>
{
    fn default() -> Self {
        Self::new(ColorOrder::Rgb)
    }
}

impl<const ROWS: usize, const COLS: usize, const BYTES: usize> OriginDimensions
    for PixelBuffer<ROWS, COLS, BYTES>
{
    fn size(&self) -> Size {
        Size::new(COLS as u32, ROWS as u32)
    }
}

impl<const ROWS: usize, const COLS: usize, const BYTES: usize>
    embedded_graphics::draw_target::DrawTarget for PixelBuffer<ROWS, COLS, BYTES>
{
    type Color = Rgb888;

    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = embedded_graphics::Pixel<Self::Color>>,
    {
        for pixel in pixels {
            self.set_grid(pixel.0.y, pixel.0.x, color(pixel.1.r(), pixel.1.g(), pixel.1.b()));
        }
        Ok(())
    }
}

unsafe impl<const ROWS: usize, const COLS: usize, const BYTES: usize> ReadBuffer
    for PixelBuffer<ROWS, COLS, BYTES>
{
    type Word = u8;

    unsafe fn read_buffer(&self) -> (*const u8, usize) {
        (self.data.as_ptr(), self.data.len())
    }
}

unsafe impl<const ROWS: usize, const COLS: usize, const BYTES: usize> ReadBuffer
    for &mut PixelBuffer<ROWS, COLS, BYTES>
{
    type Word = u8;

    unsafe fn read_buffer(&self) -> (*const u8, usize) {
        (self.data.as_ptr(), self.data.len())
    }
}

impl<const ROWS: usize, const COLS: usize, const BYTES: usize> core::fmt::Debug
    for PixelBuffer<ROWS, COLS, BYTES>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("rows", &ROWS)
            .field("cols", &COLS)
            .field("bytes", &self.data.len())
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl<const ROWS: usize, const COLS: usize, const BYTES: usize> defmt::Format
    for PixelBuffer<ROWS, COLS, BYTES>
{
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PixelBuffer<{}, {}, {}>", ROWS, COLS, BYTES);
        defmt::write!(f, " order: {}", self.order);
    }
}
