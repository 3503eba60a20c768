//! Error types for PixLZW operations.
//!
//! Every library crate in the workspace reports failures through
//! [`PixLzwError`]. The variants follow the three failure classes of the
//! codec: a full dictionary, an unresolvable code stream, and a persisted
//! file whose header does not agree with its body. The remaining variants
//! cover I/O and input validation around them.

use std::io;
use thiserror::Error;

/// The main error type for PixLZW operations.
#[derive(Debug, Error)]
pub enum PixLzwError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The dictionary already holds every code representable at `max_bits`.
    #[error("Dictionary capacity exceeded (max {max_codes} codes)")]
    CapacityExceeded {
        /// Number of codes the dictionary can hold.
        max_codes: u32,
    },

    /// A code could not be resolved against the decoder's dictionary.
    #[error("Malformed code stream: code {code} at bit position {position}: {message}")]
    MalformedStream {
        /// The offending code.
        code: u16,
        /// Bit position just after the offending code.
        position: u64,
        /// Description of the problem.
        message: String,
    },

    /// The sequence already has a code; each sequence maps to exactly one.
    #[error("Duplicate dictionary entry: sequence already has code {existing}")]
    DuplicateEntry {
        /// Code the sequence already maps to.
        existing: u16,
    },

    /// Persisted file header is missing, invalid, or inconsistent with its body.
    #[error("Format error: {message}")]
    Format {
        /// Description of the format problem.
        message: String,
    },

    /// Code width outside the supported range.
    #[error("Invalid bit width: {0} (must be 9-16)")]
    InvalidBitWidth(u8),

    /// Pixel buffer does not match the declared dimensions.
    #[error("Invalid dimensions: {width}x{height} with {len} pixels")]
    InvalidDimensions {
        /// Declared width.
        width: u64,
        /// Declared height.
        height: u64,
        /// Number of pixels actually supplied.
        len: usize,
    },

    /// The bit stream ended in the middle of a code.
    #[error("Unexpected end of data at bit position {position}")]
    UnexpectedEof {
        /// Bit position where EOF occurred.
        position: u64,
    },

    /// Meaningful bits remain after the last expected code.
    #[error("Trailing data: {bits} bits after bit position {position}")]
    TrailingData {
        /// Bit position where decoding finished.
        position: u64,
        /// Number of unread bits.
        bits: u64,
    },

    /// Source image cannot be loaded.
    #[error("Unsupported image: {message}")]
    UnsupportedImage {
        /// Description of the problem.
        message: String,
    },
}

/// Result type alias for PixLZW operations.
pub type Result<T> = std::result::Result<T, PixLzwError>;

impl PixLzwError {
    /// Create a capacity exceeded error.
    pub fn capacity_exceeded(max_codes: u32) -> Self {
        Self::CapacityExceeded { max_codes }
    }

    /// Create a duplicate entry error.
    pub fn duplicate_entry(existing: u16) -> Self {
        Self::DuplicateEntry { existing }
    }

    /// Create a malformed stream error.
    pub fn malformed(code: u16, position: u64, message: impl Into<String>) -> Self {
        Self::MalformedStream {
            code,
            position,
            message: message.into(),
        }
    }

    /// Create a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create an invalid dimensions error.
    pub fn invalid_dimensions(width: u64, height: u64, len: usize) -> Self {
        Self::InvalidDimensions { width, height, len }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(position: u64) -> Self {
        Self::UnexpectedEof { position }
    }

    /// Create a trailing data error.
    pub fn trailing_data(position: u64, bits: u64) -> Self {
        Self::TrailingData { position, bits }
    }

    /// Create an unsupported image error.
    pub fn unsupported_image(message: impl Into<String>) -> Self {
        Self::UnsupportedImage {
            message: message.into(),
        }
    }

    /// Whether this error means the persisted bytes are structurally broken
    /// (as opposed to I/O failure or bad caller input).
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            Self::MalformedStream { .. }
                | Self::Format { .. }
                | Self::UnexpectedEof { .. }
                | Self::TrailingData { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PixLzwError::capacity_exceeded(4096);
        assert!(err.to_string().contains("4096"));

        let err = PixLzwError::malformed(700, 27, "code beyond next assignable code");
        assert!(err.to_string().contains("700"));
        assert!(err.to_string().contains("next assignable"));

        let err = PixLzwError::duplicate_entry(256);
        assert!(err.to_string().contains("256"));
        assert!(!err.is_corrupt_input());

        let err = PixLzwError::format("header truncated");
        assert!(err.to_string().contains("header truncated"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PixLzwError = io_err.into();
        assert!(matches!(err, PixLzwError::Io(_)));
        assert!(!err.is_corrupt_input());
    }

    #[test]
    fn test_corrupt_input_classification() {
        assert!(PixLzwError::unexpected_eof(9).is_corrupt_input());
        assert!(PixLzwError::trailing_data(9, 12).is_corrupt_input());
        assert!(!PixLzwError::invalid_dimensions(2, 2, 3).is_corrupt_input());
    }
}
