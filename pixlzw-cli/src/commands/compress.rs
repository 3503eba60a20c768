//! Compress command implementation.

use crate::utils::{default_output, ratio_percent};
use clap::ValueEnum;
use pixlzw_image::{GrayscaleImage, LzwConfig, OverflowPolicy};
use std::path::Path;

/// Dictionary overflow policy as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Policy {
    /// Clear the dictionary and start over at 9 bits
    #[default]
    Reset,
    /// Keep the full dictionary and stop adding entries
    Freeze,
}

impl From<Policy> for OverflowPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Reset => OverflowPolicy::Reset,
            Policy::Freeze => OverflowPolicy::Freeze,
        }
    }
}

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    max_bits: u8,
    policy: Policy,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = LzwConfig::new(max_bits, policy.into());
    config.validate()?;

    let output = output.map_or_else(|| default_output(input, "plzw"), Path::to_path_buf);
    let image = GrayscaleImage::from_file(input)?;
    let compressed = image.lzw_compression_with(&output, config)?;
    let raw = image.matrix().len();

    println!(
        "{} -> {} ({}x{}, {} -> {} bytes, {:.1}%)",
        input.display(),
        output.display(),
        image.ncols(),
        image.nrows(),
        raw,
        compressed,
        ratio_percent(raw, compressed as usize)
    );
    Ok(())
}
