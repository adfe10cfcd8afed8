use std::path::{Path, PathBuf};

use gdal::cpl::CslStringList;
use gdal::raster::{Buffer, GdalDataType, RasterBand};
use gdal::{Dataset, DatasetOptions, DriverManager, GdalOpenFlags};
use log::{debug, info};
use ndarray::Array3;

use crate::composite::Layer;
use crate::error::{MergeError, Result};
use crate::pixel::Pixel;

#[derive(Debug, Clone, PartialEq)]
pub struct RasterMetadata {
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    pub data_type: GdalDataType,
    pub geotransform: Option<[f64; 6]>,
    pub projection: String,
    /// One entry per band
    pub nodata: Vec<Option<f64>>,
    pub driver: String,
}

impl RasterMetadata {
    /// (bands, rows, cols), the layout of merge buffers
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.band_count, self.height, self.width)
    }

    /// Nodata of the first band, which the merge uses as its sentinel
    pub fn nodata(&self) -> Option<f64> {
        self.nodata.first().copied().flatten()
    }

    /// Reject rasters that cannot be stacked on a buffer described by `self`
    pub fn check_compatible(&self, other: &RasterMetadata, path: &Path) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(MergeError::ShapeMismatch {
                path: path.to_path_buf(),
                expected: self.shape(),
                found: other.shape(),
            });
        }
        if self.data_type != other.data_type {
            return Err(MergeError::DataTypeMismatch {
                path: path.to_path_buf(),
                expected: format!("{:?}", self.data_type),
                found: format!("{:?}", other.data_type),
            });
        }
        Ok(())
    }
}

/// Open an existing raster read-only.
///
/// Any name GDAL understands is accepted, including `/vsi*` paths and
/// subdataset names. A failed open of a plain local path that does not exist
/// is reported as [`MergeError::InputNotFound`].
pub fn open_input(path: &Path) -> Result<Dataset> {
    debug!("Opening raster: {}", path.display());
    Dataset::open(path).map_err(|e| {
        if is_plain_file(path) && !path.exists() {
            MergeError::InputNotFound(path.to_path_buf())
        } else {
            MergeError::Gdal(e)
        }
    })
}

/// Whether `path` names a local file rather than a GDAL virtual path or
/// subdataset
fn is_plain_file(path: &Path) -> bool {
    let name = path.to_string_lossy();
    if name.starts_with("/vsi") {
        return false;
    }
    // DRIVER:"file"://sub forms; a drive letter prefix is still a file
    match name.find(':') {
        Some(1) => true,
        Some(_) => false,
        None => true,
    }
}

/// Open an existing raster for writing in place
pub fn open_for_update(path: &Path) -> Result<Dataset> {
    info!("Opening output for update: {}", path.display());
    let options = DatasetOptions {
        open_flags: GdalOpenFlags::GDAL_OF_UPDATE | GdalOpenFlags::GDAL_OF_RASTER,
        ..DatasetOptions::default()
    };
    Ok(Dataset::open_ex(path, options)?)
}

/// Extract metadata from a dataset without reading pixels
pub fn extract_metadata(dataset: &Dataset, path: &Path) -> Result<RasterMetadata> {
    let band_count = dataset.raster_count();
    let (width, height) = dataset.raster_size();

    if width == 0 || height == 0 || band_count == 0 {
        return Err(MergeError::EmptyRaster(path.to_path_buf()));
    }

    let first: RasterBand = dataset.rasterband(1)?;
    let data_type = first.band_type();

    let mut nodata = Vec::with_capacity(band_count);
    for index in 1..=band_count {
        nodata.push(dataset.rasterband(index)?.no_data_value());
    }

    let metadata = RasterMetadata {
        width,
        height,
        band_count,
        data_type,
        geotransform: dataset.geo_transform().ok(),
        projection: dataset.projection(),
        nodata,
        driver: dataset.driver().short_name(),
    };

    debug!(
        "{}: {}x{}, {} band(s), {:?}, nodata {:?}, driver {}",
        path.display(),
        metadata.width,
        metadata.height,
        metadata.band_count,
        metadata.data_type,
        metadata.nodata,
        metadata.driver
    );

    Ok(metadata)
}

/// Read every band of a dataset together with its validity mask.
///
/// The mask is taken from GDAL's mask bands. If every band reports an
/// all-valid mask the layer is returned without one.
pub fn read_layer<T: Pixel>(dataset: &Dataset, path: &Path) -> Result<Layer<T>> {
    let band_count = dataset.raster_count();
    let (width, height) = dataset.raster_size();
    let plane = width * height;

    let mut values: Vec<T> = Vec::with_capacity(band_count * plane);
    let mut valid: Vec<bool> = Vec::with_capacity(band_count * plane);
    let mut has_mask = false;

    for index in 1..=band_count {
        let band = dataset.rasterband(index)?;
        let buffer = band.read_as::<T>((0, 0), (width, height), (width, height), None)?;
        values.extend(buffer.into_iter());

        if band.mask_flags()?.is_all_valid() {
            valid.extend(std::iter::repeat(true).take(plane));
        } else {
            has_mask = true;
            let mask = band.open_mask_band()?;
            let mask_buffer =
                mask.read_as::<u8>((0, 0), (width, height), (width, height), None)?;
            valid.extend(mask_buffer.into_iter().map(|m| m != 0));
        }
    }

    let data = Array3::from_shape_vec((band_count, height, width), values)?;
    let valid = if has_mask {
        Some(Array3::from_shape_vec((band_count, height, width), valid)?)
    } else {
        None
    };

    debug!(
        "Read {} band(s) from {} (mask: {})",
        band_count,
        path.display(),
        if has_mask { "yes" } else { "no" }
    );

    Ok(Layer::new(PathBuf::from(path), data, valid))
}

/// Create a new output raster shaped like `template`
pub fn create_output<T: Pixel>(
    path: &Path,
    template: &RasterMetadata,
    driver_name: &str,
    options: &[String],
    nodata: Option<f64>,
) -> Result<Dataset> {
    info!("Creating output raster: {} ({})", path.display(), driver_name);

    let driver = DriverManager::get_driver_by_name(driver_name)?;

    let mut gdal_options = CslStringList::new();
    for opt in options {
        gdal_options.add_string(opt)?;
    }

    let mut dataset = driver.create_with_band_type_with_options::<T, _>(
        path,
        template.width,
        template.height,
        template.band_count,
        &gdal_options,
    )?;

    if let Some(geotransform) = &template.geotransform {
        dataset.set_geo_transform(geotransform)?;
    }
    if !template.projection.is_empty() {
        dataset.set_projection(&template.projection)?;
    }

    if let Some(value) = nodata {
        for index in 1..=template.band_count {
            dataset.rasterband(index)?.set_no_data_value(Some(value))?;
        }
    }

    Ok(dataset)
}

/// Write a (bands, rows, cols) array into the dataset's bands
pub fn write_canvas<T: Pixel>(dataset: &mut Dataset, data: &Array3<T>) -> Result<()> {
    let (band_count, height, width) = data.dim();

    for (i, plane) in data.outer_iter().enumerate() {
        let band_index = i + 1;
        let mut raster_band = dataset.rasterband(band_index)?;

        // outer_iter planes of a standard-layout array are row-major
        let values: Vec<T> = plane.iter().copied().collect();
        let mut buffer = Buffer::new((width, height), values);
        raster_band.write((0, 0), (width, height), &mut buffer)?;

        debug!("Wrote band {} ({}x{})", band_index, width, height);
    }

    info!("Successfully wrote {} band(s)", band_count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_file_detection() {
        assert!(is_plain_file(Path::new("a.tif")));
        assert!(is_plain_file(Path::new("/data/a.tif")));
        assert!(is_plain_file(Path::new("C:/data/a.tif")));
        assert!(!is_plain_file(Path::new("/vsimem/a.tif")));
        assert!(!is_plain_file(Path::new("/vsizip/archive.zip/a.tif")));
        assert!(!is_plain_file(Path::new("HDF5:\"f.h5\"://band")));
    }
}
