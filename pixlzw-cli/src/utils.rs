//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    match ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        Ok(style) => pb.set_style(style.progress_chars("█▓▒░ ")),
        Err(e) => tracing::warn!("progress bar template rejected: {e}"),
    }
    pb
}

/// `input` with its extension replaced by `extension`.
pub fn default_output(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

/// Compressed size as a percentage of the raw size.
pub fn ratio_percent(raw: usize, compressed: usize) -> f64 {
    if raw == 0 {
        return 0.0;
    }
    compressed as f64 / raw as f64 * 100.0
}
