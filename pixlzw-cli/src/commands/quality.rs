//! Quality command implementation: in-memory round trip per image.

use crate::utils::ratio_percent;
use pixlzw_image::{compress, decompress, read_netpbm};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Round-trip report for one image.
#[derive(Debug, Serialize)]
struct QualityReport {
    image: String,
    width: u32,
    height: u32,
    raw_size: usize,
    compressed_size: usize,
    ratio: f64,
    lossless: bool,
}

fn measure(path: &Path) -> pixlzw_image::Result<QualityReport> {
    let matrix = read_netpbm(path)?;
    let compressed = compress(&matrix)?;
    let restored = decompress(&compressed)?;

    Ok(QualityReport {
        image: path.display().to_string(),
        width: matrix.width(),
        height: matrix.height(),
        raw_size: matrix.len(),
        compressed_size: compressed.len(),
        ratio: ratio_percent(matrix.len(), compressed.len()),
        lossless: restored == matrix,
    })
}

pub fn cmd_quality(images: &[PathBuf], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let reports = images
        .iter()
        .map(|path| measure(path))
        .collect::<pixlzw_image::Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!(
            "{:>10} {:>10} {:>7} {:>8}  Image",
            "Raw", "Compressed", "Ratio", "Lossless"
        );
        println!("{}", "-".repeat(60));
        for report in &reports {
            println!(
                "{:>10} {:>10} {:>6.1}% {:>8}  {} ({}x{})",
                report.raw_size,
                report.compressed_size,
                report.ratio,
                if report.lossless { "yes" } else { "NO" },
                report.image,
                report.width,
                report.height
            );
        }
    }

    let failed: Vec<&str> = reports
        .iter()
        .filter(|r| !r.lossless)
        .map(|r| r.image.as_str())
        .collect();
    if !failed.is_empty() {
        return Err(format!("reconstruction differs for {}", failed.join(", ")).into());
    }
    Ok(())
}
