//! Verify command implementation.

use crate::utils::create_progress_bar;
use pixlzw_image::{decompress, read_file};
use std::path::PathBuf;

pub fn cmd_verify(files: &[PathBuf], progress: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_progress_bar(files.len() as u64, progress);
    let mut errors: Vec<(String, String)> = Vec::new();

    for file in files {
        let name = file.display().to_string();
        pb.set_message(name.clone());

        match read_file(file).and_then(|data| decompress(&data)) {
            Ok(matrix) => {
                tracing::debug!(
                    file = %name,
                    width = matrix.width(),
                    height = matrix.height(),
                    "verified"
                );
                pb.println(format!("  OK: {}", name));
            }
            Err(e) => {
                pb.println(format!("  FAILED: {} - {}", name, e));
                errors.push((name, e.to_string()));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!();
    println!("Verify results:");
    println!("  Total files: {}", files.len());
    println!("  OK: {}", files.len() - errors.len());
    println!("  Failed: {}", errors.len());

    if !errors.is_empty() {
        std::process::exit(2);
    }

    println!();
    println!("All files OK");
    Ok(())
}
