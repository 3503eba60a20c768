//! PLZW file header parsing and writing.

use pixlzw_core::error::{PixLzwError, Result};
use pixlzw_core::pixel_count;
use pixlzw_lzw::{LzwConfig, OverflowPolicy};
use std::io::{self, Read, Write};

/// PLZW magic bytes.
pub const PLZW_MAGIC: [u8; 4] = *b"PLZW";

/// Current format version.
pub const PLZW_VERSION: u8 = 1;

/// Header size in bytes; the code stream starts right after it.
pub const HEADER_SIZE: usize = 16;

/// PLZW file header.
///
/// Layout (little-endian):
///
/// ```text
/// 0  magic "PLZW"
/// 4  version
/// 5  max code bits
/// 6  overflow policy (0 freeze, 1 reset)
/// 7  reserved (0)
/// 8  width  (u32)
/// 12 height (u32)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlzwHeader {
    /// Codec parameters the stream was written with.
    pub config: LzwConfig,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl PlzwHeader {
    /// Create a header for a `width` x `height` image.
    pub fn new(width: u32, height: u32, config: LzwConfig) -> Self {
        Self {
            config,
            width,
            height,
        }
    }

    /// Number of pixels the stream must decode to.
    pub fn pixel_count(&self) -> Result<usize> {
        pixel_count(self.width, self.height).map_err(|_| {
            PixLzwError::format(format!(
                "invalid image dimensions {}x{}",
                self.width, self.height
            ))
        })
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&PLZW_MAGIC);
        bytes[4] = PLZW_VERSION;
        bytes[5] = self.config.max_bits;
        bytes[6] = self.config.overflow.to_byte();
        bytes[8..12].copy_from_slice(&self.width.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.height.to_le_bytes());
        bytes
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Read and validate a header.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        reader.read_exact(&mut bytes).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => PixLzwError::format(format!(
                "header truncated: need {HEADER_SIZE} bytes"
            )),
            _ => PixLzwError::Io(e),
        })?;

        if bytes[0..4] != PLZW_MAGIC {
            return Err(PixLzwError::format(format!(
                "invalid magic: expected {:02x?}, found {:02x?}",
                PLZW_MAGIC,
                &bytes[0..4]
            )));
        }

        if bytes[4] != PLZW_VERSION {
            return Err(PixLzwError::format(format!(
                "unsupported version {}",
                bytes[4]
            )));
        }

        let overflow = OverflowPolicy::from_byte(bytes[6]).ok_or_else(|| {
            PixLzwError::format(format!("unknown overflow policy {}", bytes[6]))
        })?;
        let config = LzwConfig::new(bytes[5], overflow);
        if config.validate().is_err() {
            return Err(PixLzwError::format(format!(
                "invalid max code bits {}",
                bytes[5]
            )));
        }

        if bytes[7] != 0 {
            return Err(PixLzwError::format("reserved header byte is not zero"));
        }

        let width = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        let height = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);

        let header = Self {
            config,
            width,
            height,
        };
        header.pixel_count()?;
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = PlzwHeader::new(640, 480, LzwConfig::DEFAULT);
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], b"PLZW");
        assert_eq!(bytes[4], 1);
        assert_eq!(bytes[5], 12);
        assert_eq!(bytes[6], 1);
        assert_eq!(bytes[7], 0);
        assert_eq!(&bytes[8..12], &640u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &480u32.to_le_bytes());

        let parsed = PlzwHeader::read(&mut &bytes[..]).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_truncated_header() {
        let bytes = PlzwHeader::new(2, 2, LzwConfig::DEFAULT).to_bytes();
        for len in 0..HEADER_SIZE {
            let err = PlzwHeader::read(&mut &bytes[..len]).unwrap_err();
            assert!(matches!(err, PixLzwError::Format { .. }), "len {len}");
        }
    }

    #[test]
    fn test_rejects_bad_fields() {
        let good = PlzwHeader::new(2, 2, LzwConfig::DEFAULT).to_bytes();

        let cases: [(usize, u8); 6] = [(0, b'X'), (4, 2), (5, 8), (5, 17), (6, 9), (7, 1)];
        for (offset, value) in cases {
            let mut bytes = good;
            bytes[offset] = value;
            let err = PlzwHeader::read(&mut &bytes[..]).unwrap_err();
            assert!(
                matches!(err, PixLzwError::Format { .. }),
                "byte {offset} = {value}"
            );
        }
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let bytes = PlzwHeader::new(0, 5, LzwConfig::DEFAULT).to_bytes();
        assert!(matches!(
            PlzwHeader::read(&mut &bytes[..]),
            Err(PixLzwError::Format { .. })
        ));
    }
}
