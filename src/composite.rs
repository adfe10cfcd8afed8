use std::path::{Path, PathBuf};

use log::debug;
use ndarray::{Array3, Zip};

use crate::error::{MergeError, Result};
use crate::pixel::Pixel;

/// Pixels of one source raster, shaped (bands, rows, cols)
#[derive(Debug, Clone)]
pub struct Layer<T> {
    pub path: PathBuf,
    pub data: Array3<T>,
    /// `true` where the source holds valid data. `None` when the source
    /// carries no mask at all.
    pub valid: Option<Array3<bool>>,
}

impl<T: Pixel> Layer<T> {
    pub fn new(path: impl Into<PathBuf>, data: Array3<T>, valid: Option<Array3<bool>>) -> Self {
        Self {
            path: path.into(),
            data,
            valid,
        }
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }
}

/// The accumulation buffer that layers are painted into, back to front.
///
/// Each call to [`Canvas::paint`] puts a layer on top of everything painted
/// before it, so the last layer painted has the highest priority.
#[derive(Debug, Clone)]
pub struct Canvas<T> {
    data: Array3<T>,
    nodata: T,
}

impl<T: Pixel> Canvas<T> {
    /// A canvas of `(bands, rows, cols)` holding only `nodata`
    pub fn new(shape: (usize, usize, usize), nodata: T) -> Self {
        Self {
            data: Array3::from_elem(shape, nodata),
            nodata,
        }
    }

    pub fn nodata(&self) -> T {
        self.nodata
    }

    pub fn data(&self) -> &Array3<T> {
        &self.data
    }

    pub fn into_data(self) -> Array3<T> {
        self.data
    }

    /// Cells still holding the nodata sentinel
    pub fn nodata_count(&self) -> usize {
        let nodata = self.nodata;
        self.data.iter().filter(|v| v.is_nodata(nodata)).count()
    }

    /// Paint `layer` over the canvas wherever it holds valid data.
    ///
    /// A layer without a mask covers the whole canvas.
    pub fn paint(&mut self, layer: &Layer<T>) -> Result<()> {
        self.check_shape(&layer.path, layer.shape())?;

        match &layer.valid {
            Some(valid) => {
                Zip::from(&mut self.data)
                    .and(&layer.data)
                    .and(valid)
                    .for_each(|dst, &value, &is_valid| {
                        if is_valid {
                            *dst = value;
                        }
                    });
            }
            None => {
                debug!(
                    "{} has no validity mask, copying all pixels",
                    layer.path.display()
                );
                self.data.assign(&layer.data);
            }
        }
        Ok(())
    }

    fn check_shape(&self, path: &Path, found: (usize, usize, usize)) -> Result<()> {
        let expected = self.data.dim();
        if expected != found {
            return Err(MergeError::ShapeMismatch {
                path: path.to_path_buf(),
                expected,
                found,
            });
        }
        Ok(())
    }
}
