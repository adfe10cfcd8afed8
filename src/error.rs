use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Array shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    #[error("Input raster not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("At least one input and one output path are required, got {0} path(s)")]
    TooFewFiles(usize),

    #[error("Raster has no pixels or no bands: {}", .0.display())]
    EmptyRaster(PathBuf),

    #[error(
        "Shape mismatch in {}: expected (bands, rows, cols) = {expected:?}, found {found:?}",
        path.display()
    )]
    ShapeMismatch {
        path: PathBuf,
        expected: (usize, usize, usize),
        found: (usize, usize, usize),
    },

    #[error("Data type mismatch in {}: expected {expected}, found {found}", path.display())]
    DataTypeMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Unsupported pixel data type: {0}")]
    UnsupportedDataType(String),

    #[error("Nodata value {0} cannot be represented in the raster data type")]
    InvalidNodata(f64),

    #[error("Invalid creation option: {0} (expected NAME=VALUE)")]
    InvalidCreationOption(String),
}

pub type Result<T> = std::result::Result<T, MergeError>;
