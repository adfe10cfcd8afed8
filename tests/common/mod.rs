#![allow(dead_code)]

use std::path::{Path, PathBuf};

use gdal::raster::{Buffer, GdalType};
use gdal::{Dataset, DriverManager};
use rio_merge::{MergeConfig, Verbosity};

pub const GEOTRANSFORM: [f64; 6] = [100.0, 10.0, 0.0, 200.0, 0.0, -10.0];

/// Write a GeoTIFF with one `Vec` per band
pub fn write_raster<T: GdalType + Copy>(
    path: &Path,
    width: usize,
    height: usize,
    bands: &[Vec<T>],
    nodata: Option<f64>,
) {
    let driver = DriverManager::get_driver_by_name("GTiff").unwrap();
    let mut dataset = driver
        .create_with_band_type::<T, _>(path, width, height, bands.len())
        .unwrap();
    dataset.set_geo_transform(&GEOTRANSFORM).unwrap();

    for (i, values) in bands.iter().enumerate() {
        let mut band = dataset.rasterband(i + 1).unwrap();
        if nodata.is_some() {
            band.set_no_data_value(nodata).unwrap();
        }
        let mut buffer = Buffer::new((width, height), values.clone());
        band.write((0, 0), (width, height), &mut buffer).unwrap();
    }
}

/// Read every band back as a flat row-major `Vec`
pub fn read_bands<T: GdalType + Copy>(path: &Path) -> Vec<Vec<T>> {
    let dataset = Dataset::open(path).unwrap();
    let (width, height) = dataset.raster_size();
    (1..=dataset.raster_count())
        .map(|i| {
            dataset
                .rasterband(i)
                .unwrap()
                .read_as::<T>((0, 0), (width, height), (width, height), None)
                .unwrap()
                .into_iter()
                .collect()
        })
        .collect()
}

pub fn nodata_of(path: &Path) -> Option<f64> {
    let dataset = Dataset::open(path).unwrap();
    let band = dataset.rasterband(1).unwrap();
    band.no_data_value()
}

pub fn config(inputs: &[&Path], output: &Path) -> MergeConfig {
    MergeConfig {
        inputs: inputs.iter().map(|p| p.to_path_buf()).collect(),
        output: PathBuf::from(output),
        driver: None,
        nodata: None,
        creation_options: Vec::new(),
        verbosity: Verbosity::Normal,
    }
}
