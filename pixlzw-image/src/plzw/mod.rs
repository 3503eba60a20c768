//! PLZW container support.
//!
//! A `.plzw` file is a 16-byte [`PlzwHeader`] followed by the packed LZW
//! code stream for the image's row-major pixels. The stream runs to the end
//! of the file; its logical end is the point where `width * height` pixels
//! have been decoded.
//!
//! # Example
//!
//! ```
//! use pixlzw_core::PixelMatrix;
//! use pixlzw_image::plzw;
//! use pixlzw_lzw::LzwConfig;
//!
//! let matrix = PixelMatrix::from_rows(&[[1u8, 2], [3, 4]]).unwrap();
//! let bytes = plzw::encode(&matrix, LzwConfig::DEFAULT).unwrap();
//! assert_eq!(plzw::decode(&bytes).unwrap(), matrix);
//! ```

mod header;

pub use header::{HEADER_SIZE, PLZW_MAGIC, PLZW_VERSION, PlzwHeader};

use pixlzw_core::{PixLzwError, PixelMatrix, Result};
use pixlzw_lzw::{LzwConfig, LzwDecoder, LzwEncoder};

/// Header facts plus stream size, without decoding the pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlzwInfo {
    /// Parsed header.
    pub header: PlzwHeader,
    /// Number of pixels (raw size in bytes).
    pub pixels: usize,
    /// Size of the packed code stream in bytes.
    pub stream_len: usize,
}

impl PlzwInfo {
    /// Total file size.
    pub fn file_len(&self) -> usize {
        HEADER_SIZE + self.stream_len
    }

    /// Compressed size relative to raw size, in percent.
    pub fn ratio(&self) -> f64 {
        self.file_len() as f64 / self.pixels as f64 * 100.0
    }
}

/// Compress a pixel matrix into a complete `.plzw` byte image.
pub fn encode(matrix: &PixelMatrix, config: LzwConfig) -> Result<Vec<u8>> {
    let header = PlzwHeader::new(matrix.width(), matrix.height(), config);
    let stream = LzwEncoder::new(config)?.encode(matrix.as_bytes())?;

    let mut out = Vec::with_capacity(HEADER_SIZE + stream.len());
    header.write(&mut out)?;
    out.extend_from_slice(&stream);

    tracing::debug!(
        width = matrix.width(),
        height = matrix.height(),
        max_bits = config.max_bits,
        policy = %config.overflow,
        raw = matrix.len(),
        compressed = out.len(),
        "encoded plzw image"
    );

    Ok(out)
}

/// Parse the header and check it against the stream length.
pub fn inspect(data: &[u8]) -> Result<PlzwInfo> {
    let mut reader = data;
    let header = PlzwHeader::read(&mut reader)?;
    let pixels = header.pixel_count()?;
    let stream_len = reader.len();

    // Every code takes at least 9 bits and expands to at most
    // `capacity - 255` bytes; anything beyond that cannot be this stream.
    let max_codes = (stream_len as u64 * 8) / 9;
    let max_run = u64::from(header.config.capacity()) - 255;
    if pixels as u64 > max_codes.saturating_mul(max_run) {
        return Err(PixLzwError::format(format!(
            "{}x{} image cannot come from a {stream_len}-byte stream",
            header.width, header.height
        )));
    }

    Ok(PlzwInfo {
        header,
        pixels,
        stream_len,
    })
}

/// Decode a complete `.plzw` byte image.
///
/// Header problems, a truncated stream, and trailing bytes are reported as
/// [`PixLzwError::Format`]; codes that cannot be resolved as
/// [`PixLzwError::MalformedStream`].
pub fn decode(data: &[u8]) -> Result<PixelMatrix> {
    let info = inspect(data)?;
    let header = info.header;
    let stream = &data[HEADER_SIZE..];

    let pixels = LzwDecoder::new(header.config)?
        .decode(stream, info.pixels)
        .map_err(|e| match e {
            PixLzwError::UnexpectedEof { position } => PixLzwError::format(format!(
                "code stream truncated at bit {position} of {} pixels",
                info.pixels
            )),
            PixLzwError::TrailingData { position, bits } => PixLzwError::format(format!(
                "{bits} bits of trailing data after bit {position}"
            )),
            other => other,
        })?;

    if pixels.len() != info.pixels {
        return Err(PixLzwError::format(format!(
            "decoded {} pixels, header declares {}",
            pixels.len(),
            info.pixels
        )));
    }

    tracing::debug!(
        width = header.width,
        height = header.height,
        compressed = data.len(),
        "decoded plzw image"
    );

    PixelMatrix::from_raw(header.width, header.height, pixels)
}
