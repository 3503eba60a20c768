//! # PixLZW-Image: grayscale image compression
//!
//! Ties the LZW codec to images and files:
//!
//! - [`plzw`]: the `.plzw` container (16-byte header + packed code stream)
//! - [`netpbm`]: PGM/PPM input and PGM output
//! - [`GrayscaleImage`]: a file-bound image handle
//!
//! ## Example
//!
//! ```rust
//! use pixlzw_core::PixelMatrix;
//! use pixlzw_image::{compress, decompress};
//!
//! let matrix = PixelMatrix::from_rows(&[[5u8, 5], [5, 5]]).unwrap();
//! let bytes = compress(&matrix).unwrap();
//! assert_eq!(decompress(&bytes).unwrap(), matrix);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod grayscale;
pub mod netpbm;
pub mod plzw;

pub use grayscale::GrayscaleImage;
pub use netpbm::{read_netpbm, write_pgm};
pub use pixlzw_core::{PixLzwError, PixelMatrix, Result};
pub use pixlzw_lzw::{LzwConfig, OverflowPolicy};

use std::fs;
use std::path::Path;

/// Compress an image with the default codec parameters.
pub fn compress(matrix: &PixelMatrix) -> Result<Vec<u8>> {
    plzw::encode(matrix, LzwConfig::DEFAULT)
}

/// Compress an image with explicit codec parameters.
pub fn compress_with(matrix: &PixelMatrix, config: LzwConfig) -> Result<Vec<u8>> {
    plzw::encode(matrix, config)
}

/// Decompress a `.plzw` byte image.
pub fn decompress(data: &[u8]) -> Result<PixelMatrix> {
    plzw::decode(data)
}

/// Write bytes to a file, replacing it.
pub fn write_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    Ok(())
}

/// Read a whole file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}
