//! Packed 1-bit framebuffer implementing `DrawTarget`.
//!
//! Rows are packed MSB-first, `row_bytes(width)` bytes per row, with a set bit
//! meaning [`INK`]. The backing array is a fixed [`FRAMEBUFFER_CAPACITY`] so a
//! frame can be created on the stack and moved into a display sink without
//! allocation.
//!
//! Pixels outside the frame are clipped silently, matching how hardware
//! framebuffers in this codebase treat off-screen draws.

use core::{
    convert::Infallible,
    fmt,
};

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::PointsIter,
};
use thiserror::Error;

use crate::{
    colors::{INK, PAPER},
    config::{FRAMEBUFFER_CAPACITY, row_bytes},
};

/// Requested geometry does not fit the framebuffer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{width}x{height} frame needs {needed} bytes, framebuffer holds {capacity}")]
pub struct FrameError {
    pub width: u32,
    pub height: u32,
    pub needed: usize,
    pub capacity: usize,
}

/// A finished or in-progress monochrome frame.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    row_bytes: usize,
    buffer: [u8; FRAMEBUFFER_CAPACITY],
}

impl Bitmap {
    /// Paper-filled frame of the given geometry.
    pub fn new(size: Size) -> Result<Self, FrameError> {
        let stride = row_bytes(size.width);
        let needed = stride.saturating_mul(size.height as usize);
        if needed > FRAMEBUFFER_CAPACITY {
            return Err(FrameError {
                width: size.width,
                height: size.height,
                needed,
                capacity: FRAMEBUFFER_CAPACITY,
            });
        }
        Ok(Self { size, row_bytes: stride, buffer: [0u8; FRAMEBUFFER_CAPACITY] })
    }

    /// Bytes per packed row.
    #[inline]
    pub const fn row_bytes(&self) -> usize { self.row_bytes }

    /// The packed frame, `row_bytes() * height` bytes.
    pub fn as_bytes(&self) -> &[u8] { &self.buffer[..self.row_bytes * self.size.height as usize] }

    /// Color at `point`, or `None` outside the frame.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<BinaryColor> {
        let (idx, mask) = self.locate(point)?;
        Some(if self.buffer[idx] & mask == 0 { PAPER } else { INK })
    }

    /// Whether `(x, y)` is inked. Off-frame coordinates read as paper.
    #[inline]
    pub fn is_ink(
        &self,
        x: i32,
        y: i32,
    ) -> bool {
        self.pixel(Point::new(x, y)) == Some(INK)
    }

    /// Number of inked pixels in the frame.
    pub fn ink_count(&self) -> usize { self.as_bytes().iter().map(|b| b.count_ones() as usize).sum() }

    /// Every pixel in row-major order, for sinks that redraw onto another target.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel<BinaryColor>> + '_ {
        self.bounding_box()
            .points()
            .map(move |p| Pixel(p, self.pixel(p).unwrap_or(PAPER)))
    }

    /// Set or clear a pixel. Off-frame points are ignored.
    #[inline]
    pub fn set_pixel(
        &mut self,
        point: Point,
        color: BinaryColor,
    ) {
        if let Some((idx, mask)) = self.locate(point) {
            if color.is_on() {
                self.buffer[idx] |= mask;
            } else {
                self.buffer[idx] &= !mask;
            }
        }
    }

    fn locate(
        &self,
        point: Point,
    ) -> Option<(usize, u8)> {
        let x = u32::try_from(point.x).ok()?;
        let y = u32::try_from(point.y).ok()?;
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = y as usize * self.row_bytes + (x / 8) as usize;
        Some((idx, 0x80 >> (x % 8)))
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("size", &self.size)
            .field("ink", &self.ink_count())
            .finish()
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for Bitmap {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        let used = self.row_bytes * self.size.height as usize;
        self.buffer[..used].fill(fill);

        // Keep padding bits past the right edge clear so ink_count stays exact
        let tail_bits = self.size.width % 8;
        if color.is_on() && tail_bits != 0 {
            let keep = 0xFFu8 << (8 - tail_bits);
            for row in self.buffer[..used].chunks_exact_mut(self.row_bytes) {
                if let Some(last) = row.last_mut() {
                    *last &= keep;
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
