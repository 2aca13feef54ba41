//! The pixels a single worker computes before it is allowed to write
//! them out.

use errors::{Error, Result};
use fractal::JuliaParams;
use itertools::iproduct;
use partition::RowRange;
use planes::{Dimensions, Pixel};
use std::slice::Chunks;

/// Bytes per pixel: one each for red, green and blue.
pub const BYTES_PER_PIXEL: usize = 3;

/// Row-major RGB storage for a band of rows of a larger image.  Row
/// `0` of the buffer is row `band.start_row` of the image.
#[derive(Debug)]
pub struct RenderBuffer {
    width: usize,
    band: RowRange,
    pixels: Vec<u8>,
}

impl RenderBuffer {
    /// Reserves space for `band` rows of `width` pixels.  The
    /// reservation is fallible so an oversized band is reported instead
    /// of aborting the process.
    pub fn allocate(width: usize, band: RowRange) -> Result<Self> {
        let bytes = width
            .checked_mul(band.rows)
            .and_then(|p| p.checked_mul(BYTES_PER_PIXEL))
            .ok_or(Error::AllocationFailure { bytes: ::std::usize::MAX })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(bytes)
            .map_err(|_| Error::AllocationFailure { bytes })?;
        pixels.resize(bytes, 0);
        Ok(RenderBuffer { width, band, pixels })
    }

    /// Evaluates every pixel of the band, left to right and top to
    /// bottom.  `on_row` is called with the number of rows finished so
    /// far after each row completes.
    pub fn fill<F>(
        &mut self,
        params: &JuliaParams,
        dims: Dimensions,
        tint_bias: f32,
        mut on_row: F,
    ) -> Result<()>
    where
        F: FnMut(usize),
    {
        let width = self.width;
        for (y, x) in iproduct!(0..self.band.rows, 0..width) {
            let rgb = params.evaluate(Pixel(x, self.band.start_row + y), dims, tint_bias)?;
            let idx = (y * width + x) * BYTES_PER_PIXEL;
            self.pixels[idx] = rgb.0;
            self.pixels[idx + 1] = rgb.1;
            self.pixels[idx + 2] = rgb.2;
            if x + 1 == width {
                on_row(y + 1);
            }
        }
        Ok(())
    }

    /// The band of the image this buffer holds.
    pub fn band(&self) -> RowRange {
        self.band
    }

    /// Pixels per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The raw bytes, unpadded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Iterates over the rows of the band, each `width * 3` bytes long.
    pub fn rows(&self) -> Chunks<u8> {
        // chunks() refuses a zero size, and a zero width means no bytes.
        self.pixels.chunks((self.width * BYTES_PER_PIXEL).max(1))
    }
}
