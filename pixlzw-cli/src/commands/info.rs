//! Info command implementation.

use pixlzw_image::plzw::{self, HEADER_SIZE, PLZW_VERSION};
use pixlzw_image::read_file;
use serde::Serialize;
use std::path::Path;

/// JSON view of a `.plzw` header.
#[derive(Debug, Serialize)]
struct InfoJson {
    file: String,
    version: u8,
    width: u32,
    height: u32,
    max_bits: u8,
    policy: String,
    raw_size: usize,
    header_size: usize,
    stream_size: usize,
    file_size: usize,
    ratio: f64,
}

pub fn cmd_info(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_file(file)?;
    let info = plzw::inspect(&data)?;
    let header = info.header;

    if json {
        let output = InfoJson {
            file: file.display().to_string(),
            version: PLZW_VERSION,
            width: header.width,
            height: header.height,
            max_bits: header.config.max_bits,
            policy: header.config.overflow.name().to_string(),
            raw_size: info.pixels,
            header_size: HEADER_SIZE,
            stream_size: info.stream_len,
            file_size: info.file_len(),
            ratio: info.ratio(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("PLZW Information");
    println!("================");
    println!("File: {}", file.display());
    println!("Version: {}", PLZW_VERSION);
    println!("Dimensions: {}x{}", header.width, header.height);
    println!("Max code bits: {}", header.config.max_bits);
    println!("Overflow policy: {}", header.config.overflow);
    println!();
    println!("Sizes:");
    println!("  Raw: {} bytes", info.pixels);
    println!("  Code stream: {} bytes", info.stream_len);
    println!("  File: {} bytes", info.file_len());
    println!("  Ratio: {:.1}%", info.ratio());
    Ok(())
}
