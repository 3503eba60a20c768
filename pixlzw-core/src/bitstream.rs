//! MSB-first bit-level I/O for variable-width LZW codes.
//!
//! `BitWriter` and `BitReader` are the only places where codes are turned
//! into bits and back. Every other component deals in whole codes.
//!
//! # Bit Ordering
//!
//! Codes are written most significant bit first, and bytes are filled from
//! bit 7 down to bit 0. Codes are concatenated without gaps; only the last
//! byte of a stream may carry zero padding in its low bits.
//!
//! Writing the 9-bit code `0b1_0000_0001` followed by the 9-bit code
//! `0b0_0000_0011` produces `[0x80, 0x80, 0xC0]`:
//!
//! ```text
//! 10000000 1|0000000 11|000000
//! code 1    |code 2    |padding
//! ```
//!
//! # Example
//!
//! ```
//! use pixlzw_core::bitstream::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b1_0000_0001, 9).unwrap();
//! writer.write_bits(0b0_0000_0011, 9).unwrap();
//! let data = writer.into_vec();
//! assert_eq!(data, vec![0x80, 0x80, 0xC0]);
//!
//! let mut reader = BitReader::new(&data);
//! assert_eq!(reader.read_bits(9).unwrap(), 0b1_0000_0001);
//! assert_eq!(reader.read_bits(9).unwrap(), 0b0_0000_0011);
//! assert!(reader.is_padding_only());
//! ```

use crate::error::{PixLzwError, Result};

/// Widest code either side accepts.
pub const MAX_CODE_BITS: u8 = 16;

/// MSB-first bit reader over a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Next byte to load into the buffer.
    byte_pos: usize,
    /// Bit buffer; valid bits sit in the low `bits_in_buffer` positions.
    buffer: u32,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits consumed so far.
    total_bits_read: u64,
}

impl<'a> BitReader<'a> {
    /// Create a new reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        while self.bits_in_buffer < count && self.byte_pos < self.data.len() {
            self.buffer = (self.buffer << 8) | u32::from(self.data[self.byte_pos]);
            self.byte_pos += 1;
            self.bits_in_buffer += 8;
        }

        if self.bits_in_buffer < count {
            return Err(PixLzwError::unexpected_eof(self.total_bits_read));
        }

        Ok(())
    }

    /// Read a `count`-bit code (1-16 bits), most significant bit first.
    pub fn read_bits(&mut self, count: u8) -> Result<u16> {
        if count == 0 || count > MAX_CODE_BITS {
            return Err(PixLzwError::InvalidBitWidth(count));
        }

        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let value = (self.buffer >> shift) & low_mask(count);

        self.bits_in_buffer -= count;
        self.total_bits_read += u64::from(count);

        Ok(value as u16)
    }

    /// Total bits consumed so far (the cursor position).
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Bits that have not been consumed yet.
    pub fn remaining_bits(&self) -> u64 {
        u64::from(self.bits_in_buffer) + (self.data.len() - self.byte_pos) as u64 * 8
    }

    /// True when everything left is the zero padding of the final byte.
    pub fn is_padding_only(&self) -> bool {
        self.remaining_bits() < 8 && self.buffer & low_mask(self.bits_in_buffer) == 0
    }
}

/// MSB-first bit writer producing a byte vector.
#[derive(Debug)]
pub struct BitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Bit buffer; pending bits sit in the low `bits_in_buffer` positions.
    buffer: u32,
    /// Number of pending bits (always below 8 between calls).
    bits_in_buffer: u8,
    /// Total bits written so far.
    total_bits_written: u64,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty writer with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            output: Vec::with_capacity(bytes),
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Append `value` using exactly `count` bits (1-16).
    ///
    /// Values wider than `count` bits are rejected, never truncated.
    pub fn write_bits(&mut self, value: u16, count: u8) -> Result<()> {
        if count == 0 || count > MAX_CODE_BITS {
            return Err(PixLzwError::InvalidBitWidth(count));
        }
        if u32::from(value) > low_mask(count) {
            return Err(PixLzwError::malformed(
                value,
                self.total_bits_written,
                format!("code does not fit in {count} bits"),
            ));
        }

        self.buffer = (self.buffer << count) | u32::from(value);
        self.bits_in_buffer += count;
        self.total_bits_written += u64::from(count);

        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }
        self.buffer &= low_mask(self.bits_in_buffer);

        Ok(())
    }

    /// Total bits written so far, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Pad the final partial byte with zeros and return the bytes.
    pub fn into_vec(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            let byte = (self.buffer << (8 - self.bits_in_buffer)) as u8;
            self.output.push(byte);
        }
        self.output
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn low_mask(count: u8) -> u32 {
    (1u32 << count) - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_layout() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b1100, 4).unwrap();
        writer.write_bits(0b1, 1).unwrap();

        assert_eq!(writer.into_vec(), vec![0b1011_1001]);
    }

    #[test]
    fn test_nine_bit_codes_cross_bytes() {
        let mut writer = BitWriter::new();
        writer.write_bits(0x101, 9).unwrap();
        writer.write_bits(0x003, 9).unwrap();
        assert_eq!(writer.bits_written(), 18);

        let data = writer.into_vec();
        assert_eq!(data, vec![0x80, 0x80, 0xC0]);

        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(9).unwrap(), 0x101);
        assert_eq!(reader.read_bits(9).unwrap(), 0x003);
        assert_eq!(reader.bits_read(), 18);
        assert_eq!(reader.remaining_bits(), 6);
        assert!(reader.is_padding_only());
    }

    #[test]
    fn test_mixed_widths_roundtrip() {
        let codes: [(u16, u8); 5] = [(255, 9), (511, 9), (512, 10), (4095, 12), (65535, 16)];

        let mut writer = BitWriter::new();
        for &(code, width) in &codes {
            writer.write_bits(code, width).unwrap();
        }
        let data = writer.into_vec();
        assert_eq!(data.len(), (9 + 9 + 10 + 12 + 16_usize).div_ceil(8));

        let mut reader = BitReader::new(&data);
        for &(code, width) in &codes {
            assert_eq!(reader.read_bits(width).unwrap(), code);
        }
        assert!(reader.is_padding_only());
    }

    #[test]
    fn test_byte_boundary() {
        let mut writer = BitWriter::new();
        writer.write_bits(0xAB, 8).unwrap();
        let data = writer.into_vec();
        assert_eq!(data, vec![0xAB]);

        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(8).unwrap(), 0xAB);
        assert_eq!(reader.remaining_bits(), 0);
        assert!(reader.is_padding_only());
    }

    #[test]
    fn test_read_past_end() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);
        let err = reader.read_bits(9).unwrap_err();
        assert!(matches!(err, PixLzwError::UnexpectedEof { position: 0 }));
    }

    #[test]
    fn test_nonzero_padding_detected() {
        let data = [0x80, 0x81];
        let mut reader = BitReader::new(&data);
        assert_eq!(reader.read_bits(9).unwrap(), 0x101);
        assert!(!reader.is_padding_only());
    }

    #[test]
    fn test_whole_trailing_byte_detected() {
        let data = [0x80, 0x80, 0x00];
        let mut reader = BitReader::new(&data);
        reader.read_bits(9).unwrap();
        assert_eq!(reader.remaining_bits(), 15);
        assert!(!reader.is_padding_only());
    }

    #[test]
    fn test_rejects_invalid_widths_and_values() {
        let mut writer = BitWriter::new();
        assert!(matches!(
            writer.write_bits(1, 0),
            Err(PixLzwError::InvalidBitWidth(0))
        ));
        assert!(matches!(
            writer.write_bits(1, 17),
            Err(PixLzwError::InvalidBitWidth(17))
        ));
        assert!(matches!(
            writer.write_bits(512, 9),
            Err(PixLzwError::MalformedStream { code: 512, .. })
        ));
    }
}
