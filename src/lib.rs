// Library exports for testing and reuse

pub mod cli;
pub mod composite;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod pixel;

// Re-export commonly used types
pub use composite::{Canvas, Layer};
pub use config::{MergeConfig, Verbosity};
pub use error::{MergeError, Result};
pub use io::RasterMetadata;
pub use merge::merge_files;
pub use pixel::Pixel;
