//! Row-major matrix of 8-bit grayscale intensities.
//!
//! `PixelMatrix` is the hand-off type between image loading and the codec.
//! Its flattened byte order is fixed: row 0 left to right, then row 1, and
//! so on. Both the encoder and the decoder see exactly this order.

use crate::error::{PixLzwError, Result};

/// A `height` x `width` grid of 8-bit intensities stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelMatrix {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelMatrix {
    /// Create a matrix with every pixel set to 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// Wrap a row-major pixel buffer.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let len = pixel_count(width, height)?;
        if pixels.len() != len {
            return Err(PixLzwError::invalid_dimensions(
                u64::from(width),
                u64::from(height),
                pixels.len(),
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a matrix from rows of equal length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let total: usize = rows.iter().map(|r| r.as_ref().len()).sum();

        if rows.iter().any(|r| r.as_ref().len() != width) {
            return Err(PixLzwError::invalid_dimensions(
                width as u64,
                height as u64,
                total,
            ));
        }

        let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(PixLzwError::invalid_dimensions(
                    width as u64,
                    height as u64,
                    total,
                ));
            }
        };

        let mut pixels = Vec::with_capacity(total);
        for row in rows {
            pixels.extend_from_slice(row.as_ref());
        }
        Self::from_raw(w, h, pixels)
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false for a constructed matrix; both dimensions are at least 1.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at (`row`, `col`), if in range.
    pub fn get(&self, row: u32, col: u32) -> Option<u8> {
        self.index(row, col).map(|i| self.pixels[i])
    }

    /// Set the pixel at (`row`, `col`). Returns false when out of range.
    pub fn set(&mut self, row: u32, col: u32, value: u8) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.pixels[i] = value;
                true
            }
            None => false,
        }
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// The flattened row-major byte sequence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the matrix and return the flattened pixels.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    fn index(&self, row: u32, col: u32) -> Option<usize> {
        if row < self.height && col < self.width {
            Some(row as usize * self.width as usize + col as usize)
        } else {
            None
        }
    }
}

/// Number of pixels in a `width` x `height` image.
///
/// Fails when either dimension is zero or the product overflows `usize`.
pub fn pixel_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(PixLzwError::invalid_dimensions(
            u64::from(width),
            u64::from(height),
            0,
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| PixLzwError::invalid_dimensions(u64::from(width), u64::from(height), 0))
}
