//! # PixLZW-LZW: variable-width LZW for pixel data
//!
//! This crate provides the LZW codec used by PixLZW to store 8-bit
//! grayscale pixels.
//!
//! ## Stream format
//!
//! - **Alphabet**: codes 0-255 stand for the single bytes
//! - **No control codes**: no clear or end-of-information codes; the stream
//!   ends when the expected number of bytes has been decoded
//! - **Code width**: starts at 9 bits and grows to the smallest width that
//!   holds the highest assigned code, up to `max_bits` (12 by default)
//! - **Bit order**: MSB-first, codes packed without gaps, final byte
//!   zero-padded
//! - **Overflow**: once `2^max_bits` codes exist the table either resets
//!   to the 256 literals (default) or freezes
//!
//! ## Example
//!
//! ```rust
//! use pixlzw_lzw::{compress, decompress, LzwConfig};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let compressed = compress(original, LzwConfig::DEFAULT).unwrap();
//! let decompressed = decompress(&compressed, original.len(), LzwConfig::DEFAULT).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod dictionary;
mod encoder;
mod width;

pub use config::{
    DEFAULT_MAX_BITS, DEFAULT_OVERFLOW_POLICY, LITERAL_CODES, LzwConfig, MIN_CODE_BITS,
    OverflowPolicy,
};
pub use decoder::LzwDecoder;
pub use dictionary::LzwDictionary;
pub use encoder::{EmittedCode, LzwEncoder, pack_codes};
pub use pixlzw_core::{PixLzwError, Result};
pub use width::{CodeWidth, bits_for};

/// Compress data with LZW using the given configuration.
///
/// # Example
///
/// ```rust
/// use pixlzw_lzw::{compress, LzwConfig};
///
/// let data = vec![42u8; 256];
/// let compressed = compress(&data, LzwConfig::DEFAULT).unwrap();
/// assert!(compressed.len() < data.len());
/// ```
pub fn compress(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(config)?;
    encoder.encode(data)
}

/// Decompress LZW data that expands to exactly `expected_size` bytes.
///
/// # Example
///
/// ```rust
/// use pixlzw_lzw::{compress, decompress, LzwConfig};
///
/// let original = b"Hello, World!";
/// let compressed = compress(original, LzwConfig::DEFAULT).unwrap();
/// let decompressed = decompress(&compressed, original.len(), LzwConfig::DEFAULT).unwrap();
/// assert_eq!(decompressed, original);
/// ```
pub fn decompress(data: &[u8], expected_size: usize, config: LzwConfig) -> Result<Vec<u8>> {
    let mut decoder = LzwDecoder::new(config)?;
    decoder.decode(data, expected_size)
}
