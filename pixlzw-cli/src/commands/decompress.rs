//! Decompress command implementation.

use crate::utils::default_output;
use pixlzw_image::GrayscaleImage;
use std::path::Path;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map_or_else(|| default_output(input, "pgm"), Path::to_path_buf);
    if output == input {
        return Err(format!("refusing to overwrite input {}", input.display()).into());
    }

    let image = GrayscaleImage::lzw_decompression(input, &output)?;
    println!(
        "{} -> {} ({}x{})",
        input.display(),
        output.display(),
        image.ncols(),
        image.nrows()
    );
    Ok(())
}
