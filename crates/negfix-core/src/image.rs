//! In-memory 16-bit RGB image grid
//!
//! Every pipeline stage consumes a borrowed `Rgb16Image` and returns a freshly
//! allocated one. Samples are stored row-major and interleaved (R, G, B), with
//! `y = 0` as the top row.

use crate::error::{NegfixError, Result};

/// Largest representable sample value (16 bits per channel).
pub const MAX_SAMPLE: u16 = u16::MAX;

/// Number of color channels carried by the grid.
pub const CHANNELS: usize = 3;

/// Dense W x H grid of RGB samples in `[0, MAX_SAMPLE]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rgb16Image {
    width: u32,
    height: u32,
    data: Vec<u16>,
}

impl Rgb16Image {
    /// Create a black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0])
    }

    /// Create an image where every pixel has the given color.
    pub fn filled(width: u32, height: u32, rgb: [u16; 3]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap interleaved RGB samples, checking that the buffer covers every pixel.
    pub fn from_raw(width: u32, height: u32, data: Vec<u16>) -> Result<Self> {
        let expected_len = width as usize * height as usize * CHANNELS;
        if data.len() != expected_len {
            return Err(NegfixError::InvalidInput(format!(
                "RGB buffer size mismatch: expected {}, got {}",
                expected_len,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Interleaved RGB samples.
    pub fn as_raw(&self) -> &[u16] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Color at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u16; 3] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u16; 3]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgb);
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.data.chunks_exact(CHANNELS).map(|p| [p[0], p[1], p[2]])
    }

    /// Build a new image of the same size by transforming every pixel.
    pub fn map_pixels<F>(&self, mut f: F) -> Rgb16Image
    where
        F: FnMut([u16; 3]) -> [u16; 3],
    {
        let mut data = Vec::with_capacity(self.data.len());
        for rgb in self.pixels() {
            data.extend_from_slice(&f(rgb));
        }
        Rgb16Image {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Samples as RGBA with a fully opaque alpha channel.
    pub fn to_rgba16(&self) -> Vec<u16> {
        let mut out = Vec::with_capacity(self.pixel_count() * 4);
        for [r, g, b] in self.pixels() {
            out.extend_from_slice(&[r, g, b, MAX_SAMPLE]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_rejects_short_buffer() {
        let result = Rgb16Image::from_raw(2, 2, vec![0; 11]);
        assert!(matches!(result, Err(NegfixError::InvalidInput(_))));
    }

    #[test]
    fn test_pixel_addressing_is_row_major() {
        let mut image = Rgb16Image::new(3, 2);
        image.set_pixel(2, 1, [1, 2, 3]);

        assert_eq!(image.pixel(2, 1), [1, 2, 3]);
        assert_eq!(&image.as_raw()[15..18], &[1, 2, 3]);
        assert_eq!(image.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_map_pixels_leaves_source_untouched() {
        let source = Rgb16Image::filled(2, 2, [10, 20, 30]);
        let mapped = source.map_pixels(|[r, g, b]| [r + 1, g + 1, b + 1]);

        assert_eq!(source.pixel(1, 1), [10, 20, 30]);
        assert_eq!(mapped.pixel(1, 1), [11, 21, 31]);
        assert_eq!(mapped.dimensions(), (2, 2));
    }

    #[test]
    fn test_rgba_export_is_opaque() {
        let image = Rgb16Image::filled(1, 2, [5, 6, 7]);
        assert_eq!(image.to_rgba16(), vec![5, 6, 7, 65535, 5, 6, 7, 65535]);
    }
}
