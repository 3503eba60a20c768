//! PixLZW CLI - LZW compression for grayscale images.

mod commands;
mod logging;
mod utils;

use clap::{Parser, Subcommand};
use commands::{Policy, cmd_compress, cmd_decompress, cmd_info, cmd_quality, cmd_verify};
use pixlzw_lzw::DEFAULT_MAX_BITS;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixlzw")]
#[command(author, version, about = "LZW compression for 8-bit grayscale images")]
#[command(long_about = "
PixLZW compresses 8-bit grayscale images (PGM, or PPM converted to gray)
into .plzw files and restores them exactly.

Examples:
  pixlzw compress photo.pgm
  pixlzw compress scan.ppm -o scan.plzw --max-bits 16
  pixlzw decompress photo.plzw -o restored.pgm
  pixlzw info photo.plzw --json
  pixlzw verify *.plzw
  pixlzw quality a.pgm b.pgm
")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a PGM/PPM image into a .plzw file
    #[command(alias = "c")]
    Compress {
        /// Input image
        input: PathBuf,

        /// Output file (defaults to the input with a .plzw extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum code width in bits (9-16)
        #[arg(short = 'b', long, default_value_t = DEFAULT_MAX_BITS,
              value_parser = clap::value_parser!(u8).range(9..=16))]
        max_bits: u8,

        /// What to do when the dictionary fills up
        #[arg(short, long, value_enum, default_value = "reset")]
        policy: Policy,
    },

    /// Restore a .plzw file to a PGM image
    #[command(alias = "d")]
    Decompress {
        /// Compressed file
        input: PathBuf,

        /// Output image (defaults to the input with a .pgm extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show header information of a .plzw file
    #[command(alias = "i")]
    Info {
        /// Compressed file
        file: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Fully decode .plzw files and report any that are damaged
    #[command(alias = "t")]
    Verify {
        /// Compressed files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Compress and restore images in memory, reporting sizes
    #[command(alias = "q")]
    Quality {
        /// Input images
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            max_bits,
            policy,
        } => cmd_compress(&input, output.as_deref(), max_bits, policy),
        Commands::Decompress { input, output } => cmd_decompress(&input, output.as_deref()),
        Commands::Info { file, json } => cmd_info(&file, json),
        Commands::Verify { files, no_progress } => cmd_verify(&files, !no_progress),
        Commands::Quality { images, json } => cmd_quality(&images, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
