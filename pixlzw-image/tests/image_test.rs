//! End-to-end tests for image compression, the container, and file I/O.

use pixlzw_image::plzw::{self, HEADER_SIZE};
use pixlzw_image::{
    GrayscaleImage, LzwConfig, OverflowPolicy, PixLzwError, PixelMatrix, compress, compress_with,
    decompress, read_file, read_netpbm, write_file, write_pgm,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pixlzw_image_test_{}_{}", std::process::id(), name))
}

fn remove_temp_file(path: &Path) {
    let _ = std::fs::remove_file(path);
}

fn random_matrix(seed: u64, width: u32, height: u32, levels: u8) -> PixelMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let pixels = (0..width * height)
        .map(|_| rng.gen_range(0..levels))
        .collect();
    PixelMatrix::from_raw(width, height, pixels).unwrap()
}

#[test]
fn test_uniform_2x2() {
    let matrix = PixelMatrix::from_rows(&[[5u8, 5], [5, 5]]).unwrap();
    let bytes = compress(&matrix).unwrap();
    assert_eq!(decompress(&bytes).unwrap(), matrix);
}

#[test]
fn test_distinct_row_does_not_shrink() {
    let matrix = PixelMatrix::from_rows(&[[0u8, 1, 2, 3]]).unwrap();
    let bytes = compress(&matrix).unwrap();

    // Four 9-bit codes need 36 bits, more than the 4 raw bytes.
    assert_eq!(bytes.len() - HEADER_SIZE, 5);
    assert!(bytes.len() >= matrix.len());
    assert_eq!(decompress(&bytes).unwrap(), matrix);
}

#[test]
fn test_truncated_file_rejected() {
    let matrix = random_matrix(7, 32, 32, 8);
    let bytes = compress(&matrix).unwrap();

    for cut in [0, 5, HEADER_SIZE - 1, HEADER_SIZE, HEADER_SIZE + 3, bytes.len() - 1] {
        let err = decompress(&bytes[..cut]).unwrap_err();
        assert!(
            matches!(
                err,
                PixLzwError::Format { .. } | PixLzwError::MalformedStream { .. }
            ),
            "cut at {cut}: {err}"
        );
    }
}

#[test]
fn test_repeating_pattern_compresses() {
    const LEVELS: [u8; 4] = [16, 96, 160, 240];
    let mut matrix = PixelMatrix::new(16, 16).unwrap();
    for row in 0..16 {
        for col in 0..16 {
            matrix.set(row, col, LEVELS[(col % 4) as usize]);
        }
    }

    let bytes = compress(&matrix).unwrap();
    assert!(bytes.len() < 256, "compressed to {} bytes", bytes.len());
    assert_eq!(decompress(&bytes).unwrap(), matrix);
}

#[test]
fn test_single_pixel() {
    let matrix = PixelMatrix::from_rows(&[[200u8]]).unwrap();
    let bytes = compress(&matrix).unwrap();
    assert_eq!(&bytes[HEADER_SIZE..], &[0x64, 0x00]);
    assert_eq!(decompress(&bytes).unwrap(), matrix);
}

#[test]
fn test_random_images_roundtrip() {
    let configs = [
        LzwConfig::DEFAULT,
        LzwConfig::WIDE,
        LzwConfig::new(9, OverflowPolicy::Freeze),
        LzwConfig::new(10, OverflowPolicy::Reset),
    ];
    for seed in 0..6u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let width = rng.gen_range(1..120);
        let height = rng.gen_range(1..120);
        let levels = rng.gen_range(1..=255);
        let matrix = random_matrix(seed, width, height, levels);

        for config in configs {
            let bytes = compress_with(&matrix, config).unwrap();
            assert_eq!(
                decompress(&bytes).unwrap(),
                matrix,
                "seed {seed}, {width}x{height}, {config:?}"
            );
        }
    }
}

#[test]
fn test_compression_is_deterministic() {
    let matrix = random_matrix(11, 64, 48, 32);
    assert_eq!(compress(&matrix).unwrap(), compress(&matrix).unwrap());
}

#[test]
fn test_invalid_config_rejected() {
    let matrix = PixelMatrix::new(2, 2).unwrap();
    let err = compress_with(&matrix, LzwConfig::new(17, OverflowPolicy::Reset)).unwrap_err();
    assert!(matches!(err, PixLzwError::InvalidBitWidth(17)));
}

#[test]
fn test_bad_magic_and_version() {
    let bytes = compress(&PixelMatrix::new(3, 3).unwrap()).unwrap();

    let mut bad_magic = bytes.clone();
    bad_magic[0] = b'G';
    assert!(matches!(
        decompress(&bad_magic),
        Err(PixLzwError::Format { .. })
    ));

    let mut bad_version = bytes;
    bad_version[4] = 9;
    assert!(matches!(
        decompress(&bad_version),
        Err(PixLzwError::Format { .. })
    ));
}

#[test]
fn test_inspect_reports_sizes() {
    let matrix = random_matrix(3, 20, 10, 4);
    let bytes = compress(&matrix).unwrap();
    let info = plzw::inspect(&bytes).unwrap();
    assert_eq!(info.pixels, 200);
    assert_eq!(info.file_len(), bytes.len());
    assert!(info.ratio() < 100.0);
}

#[test]
fn test_file_roundtrip() {
    let path = temp_path("roundtrip.plzw");
    let matrix = random_matrix(5, 30, 30, 16);

    write_file(&path, &compress(&matrix).unwrap()).unwrap();
    let restored = decompress(&read_file(&path).unwrap()).unwrap();
    assert_eq!(restored, matrix);

    remove_temp_file(&path);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = read_file(temp_path("does_not_exist.plzw")).unwrap_err();
    assert!(matches!(err, PixLzwError::Io(_)));
}

#[test]
fn test_pgm_file_roundtrip() {
    let path = temp_path("gray.pgm");
    let matrix = random_matrix(9, 17, 5, 255);

    write_pgm(&path, &matrix).unwrap();
    assert_eq!(read_netpbm(&path).unwrap(), matrix);

    remove_temp_file(&path);
}

#[test]
fn test_grayscale_image_workflow() {
    let source = temp_path("workflow_src.pgm");
    let compressed = temp_path("workflow.plzw");
    let output = temp_path("workflow_out.pgm");
    let raw = temp_path("workflow.raw");

    let mut image = GrayscaleImage::new(24, 40).unwrap();
    for row in 0..24 {
        for col in 0..40 {
            image.set(row, col, ((row * 8 + col) % 256) as u8);
        }
    }
    write_pgm(&source, image.matrix()).unwrap();

    let loaded = GrayscaleImage::from_file(&source).unwrap();
    assert_eq!(loaded, image);

    let size = loaded.lzw_compression(&compressed).unwrap();
    assert_eq!(size, std::fs::metadata(&compressed).unwrap().len());

    let restored = GrayscaleImage::lzw_decompression(&compressed, &output).unwrap();
    assert_eq!(restored, image);
    assert_eq!(GrayscaleImage::from_file(&output).unwrap(), image);

    image.save_raw(&raw).unwrap();
    assert_eq!(std::fs::read(&raw).unwrap(), image.matrix().as_bytes());

    for path in [&source, &compressed, &output, &raw] {
        remove_temp_file(path);
    }
}
