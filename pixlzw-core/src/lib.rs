//! # PixLZW Core
//!
//! Core components shared by the PixLZW crates:
//!
//! - [`bitstream`]: MSB-first bit reader/writer for variable-width codes
//! - [`pixel`]: row-major grayscale [`PixelMatrix`]
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     pixlzw compress / decompress / info / verify        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     .plzw header, Netpbm I/O, GrayscaleImage            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Dictionary, code-width controller, LZW enc/dec      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, PixelMatrix, errors            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pixlzw_core::{BitReader, BitWriter, PixelMatrix};
//!
//! let matrix = PixelMatrix::from_rows(&[[5u8, 5], [5, 5]]).unwrap();
//! assert_eq!(matrix.as_bytes(), &[5, 5, 5, 5]);
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(300, 9).unwrap();
//! let data = writer.into_vec();
//! assert_eq!(BitReader::new(&data).read_bits(9).unwrap(), 300);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod pixel;

pub use bitstream::{BitReader, BitWriter, MAX_CODE_BITS};
pub use error::{PixLzwError, Result};
pub use pixel::{PixelMatrix, pixel_count};
