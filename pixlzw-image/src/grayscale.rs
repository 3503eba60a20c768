//! File-oriented grayscale image handle.

use crate::{netpbm, plzw, read_file, write_file};
use pixlzw_core::{PixelMatrix, Result};
use pixlzw_lzw::LzwConfig;
use std::fs;
use std::path::Path;

/// An 8-bit grayscale image with compression helpers bound to files.
///
/// Rows and columns are addressed as `(row, col)`, matching the matrix
/// layout of the underlying [`PixelMatrix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayscaleImage {
    matrix: PixelMatrix,
}

impl GrayscaleImage {
    /// Create an all-black image with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32) -> Result<Self> {
        Ok(Self {
            matrix: PixelMatrix::new(ncols, nrows)?,
        })
    }

    /// Load a PGM or PPM file, converting color to grayscale.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        netpbm::read_netpbm(path).map(Self::from)
    }

    /// Number of rows.
    pub fn nrows(&self) -> u32 {
        self.matrix.height()
    }

    /// Number of columns.
    pub fn ncols(&self) -> u32 {
        self.matrix.width()
    }

    /// Pixel at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: u32, col: u32) -> Option<u8> {
        self.matrix.get(row, col)
    }

    /// Set the pixel at `(row, col)`. Returns `false` when out of bounds.
    pub fn set(&mut self, row: u32, col: u32, value: u8) -> bool {
        self.matrix.set(row, col, value)
    }

    /// Borrow the pixel matrix.
    pub fn matrix(&self) -> &PixelMatrix {
        &self.matrix
    }

    /// Take the pixel matrix.
    pub fn into_matrix(self) -> PixelMatrix {
        self.matrix
    }

    /// Compress with the default parameters into a `.plzw` file at `path`.
    ///
    /// Returns the size of the written file in bytes.
    pub fn lzw_compression(&self, path: impl AsRef<Path>) -> Result<u64> {
        self.lzw_compression_with(path, LzwConfig::DEFAULT)
    }

    /// Compress with explicit codec parameters into a `.plzw` file.
    pub fn lzw_compression_with(&self, path: impl AsRef<Path>, config: LzwConfig) -> Result<u64> {
        let bytes = plzw::encode(&self.matrix, config)?;
        write_file(path.as_ref(), &bytes)?;
        tracing::info!(
            path = %path.as_ref().display(),
            raw = self.matrix.len(),
            compressed = bytes.len(),
            "wrote compressed image"
        );
        Ok(bytes.len() as u64)
    }

    /// Decode a `.plzw` file and write the result as PGM to `output_path`.
    pub fn lzw_decompression(
        compressed_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<Self> {
        let bytes = read_file(compressed_path.as_ref())?;
        let matrix = plzw::decode(&bytes)?;
        netpbm::write_pgm(output_path.as_ref(), &matrix)?;
        tracing::info!(
            input = %compressed_path.as_ref().display(),
            output = %output_path.as_ref().display(),
            "wrote decompressed image"
        );
        Ok(Self::from(matrix))
    }

    /// Dump the raw row-major pixel bytes, without any header.
    pub fn save_raw(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.matrix.as_bytes())?;
        Ok(())
    }
}

impl From<PixelMatrix> for GrayscaleImage {
    fn from(matrix: PixelMatrix) -> Self {
        Self { matrix }
    }
}
