//! Command implementations for PixLZW CLI.

pub mod compress;
pub mod decompress;
pub mod info;
pub mod quality;
pub mod verify;

pub use compress::{Policy, cmd_compress};
pub use decompress::cmd_decompress;
pub use info::cmd_info;
pub use quality::cmd_quality;
pub use verify::cmd_verify;
