//! Netpbm image I/O.
//!
//! Reads grayscale (`P2`, `P5`) and color (`P3`, `P6`) images into a
//! [`PixelMatrix`], converting color to luma, and writes binary `P5`
//! grayscale files. Sample depths other than 8 bits are rescaled to 0-255.

use pixlzw_core::{PixLzwError, PixelMatrix, Result, pixel_count};
use std::fs;
use std::path::Path;

/// Netpbm variants this module understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetpbmKind {
    /// `P2`: ASCII grayscale.
    AsciiGray,
    /// `P3`: ASCII RGB.
    AsciiRgb,
    /// `P5`: binary grayscale.
    BinaryGray,
    /// `P6`: binary RGB.
    BinaryRgb,
}

impl NetpbmKind {
    fn from_magic(magic: &[u8]) -> Option<Self> {
        match magic {
            b"P2" => Some(Self::AsciiGray),
            b"P3" => Some(Self::AsciiRgb),
            b"P5" => Some(Self::BinaryGray),
            b"P6" => Some(Self::BinaryRgb),
            _ => None,
        }
    }

    fn channels(self) -> usize {
        match self {
            Self::AsciiGray | Self::BinaryGray => 1,
            Self::AsciiRgb | Self::BinaryRgb => 3,
        }
    }

    fn is_binary(self) -> bool {
        matches!(self, Self::BinaryGray | Self::BinaryRgb)
    }
}

/// Load a Netpbm file as grayscale.
pub fn read_netpbm(path: impl AsRef<Path>) -> Result<PixelMatrix> {
    let data = fs::read(path.as_ref())?;
    tracing::trace!(path = %path.as_ref().display(), len = data.len(), "read netpbm file");
    parse_netpbm(&data)
}

/// Write a matrix as a binary PGM (`P5`) file.
pub fn write_pgm(path: impl AsRef<Path>, matrix: &PixelMatrix) -> Result<()> {
    fs::write(path, encode_pgm(matrix))?;
    Ok(())
}

/// Serialize a matrix as binary PGM (`P5`, maxval 255).
pub fn encode_pgm(matrix: &PixelMatrix) -> Vec<u8> {
    let header = format!("P5\n{} {}\n255\n", matrix.width(), matrix.height());
    let mut out = Vec::with_capacity(header.len() + matrix.len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(matrix.as_bytes());
    out
}

/// ITU-R 601-2 luma, rounded.
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b) + 500) / 1000) as u8
}

/// Parse Netpbm bytes as grayscale.
pub fn parse_netpbm(data: &[u8]) -> Result<PixelMatrix> {
    let mut tokens = Tokens { data, pos: 0 };

    let magic = tokens.next_token()?;
    let kind = NetpbmKind::from_magic(magic).ok_or_else(|| {
        PixLzwError::unsupported_image(format!(
            "not a grayscale or RGB Netpbm file (magic {:?})",
            String::from_utf8_lossy(magic)
        ))
    })?;

    let width = tokens.next_u32()?;
    let height = tokens.next_u32()?;
    let maxval = tokens.next_u32()?;
    if maxval == 0 || maxval > u32::from(u16::MAX) {
        return Err(PixLzwError::unsupported_image(format!(
            "maxval {maxval} out of range"
        )));
    }

    let pixels = pixel_count(width, height)?;
    let samples = pixels
        .checked_mul(kind.channels())
        .ok_or_else(|| PixLzwError::invalid_dimensions(u64::from(width), u64::from(height), 0))?;

    let raw = if kind.is_binary() {
        tokens.skip_single_whitespace()?;
        read_binary_samples(&data[tokens.pos..], samples, maxval)?
    } else {
        let mut out = Vec::with_capacity(samples.min(data.len()));
        for _ in 0..samples {
            let value = tokens.next_u32()?;
            if value > maxval {
                return Err(PixLzwError::unsupported_image(format!(
                    "sample {value} exceeds maxval {maxval}"
                )));
            }
            out.push(value as u16);
        }
        out
    };

    let gray: Vec<u8> = match kind.channels() {
        1 => raw.iter().map(|&v| scale(v, maxval)).collect(),
        _ => raw
            .chunks_exact(3)
            .map(|px| luma(scale(px[0], maxval), scale(px[1], maxval), scale(px[2], maxval)))
            .collect(),
    };

    PixelMatrix::from_raw(width, height, gray)
}

fn read_binary_samples(body: &[u8], samples: usize, maxval: u32) -> Result<Vec<u16>> {
    let bytes_per_sample = if maxval > 255 { 2 } else { 1 };
    let needed = samples.saturating_mul(bytes_per_sample);
    if body.len() < needed {
        return Err(PixLzwError::unsupported_image(format!(
            "raster truncated: need {needed} bytes, have {}",
            body.len()
        )));
    }

    let body = &body[..needed];
    let values = if bytes_per_sample == 2 {
        body.chunks_exact(2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
            .collect()
    } else {
        body.iter().map(|&b| u16::from(b)).collect()
    };
    Ok(values)
}

/// Rescale a sample in `0..=maxval` to `0..=255`.
fn scale(value: u16, maxval: u32) -> u8 {
    if maxval == 255 {
        return value as u8;
    }
    ((u32::from(value) * 255 + maxval / 2) / maxval).min(255) as u8
}

/// Whitespace/comment-aware header tokenizer.
struct Tokens<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn next_token(&mut self) -> Result<&'a [u8]> {
        loop {
            match self.data.get(self.pos).copied() {
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'#') => {
                    while self.data.get(self.pos).is_some_and(|&b| b != b'\n') {
                        self.pos += 1;
                    }
                }
                Some(_) => break,
                None => return Err(PixLzwError::unsupported_image("unexpected end of header")),
            }
        }

        let start = self.pos;
        while self
            .data
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'#')
        {
            self.pos += 1;
        }
        Ok(&self.data[start..self.pos])
    }

    fn next_u32(&mut self) -> Result<u32> {
        let token = self.next_token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                PixLzwError::unsupported_image(format!(
                    "expected a number, found {:?}",
                    String::from_utf8_lossy(token)
                ))
            })
    }

    fn skip_single_whitespace(&mut self) -> Result<()> {
        match self.data.get(self.pos) {
            Some(b) if b.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(PixLzwError::unsupported_image(
                "missing whitespace before raster",
            )),
        }
    }
}
