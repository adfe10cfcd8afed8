use gdal::raster::GdalDataType;
use log::{debug, info, warn};

use crate::composite::Canvas;
use crate::config::MergeConfig;
use crate::error::{MergeError, Result};
use crate::io::{self, RasterMetadata};
use crate::pixel::Pixel;

/// Merge `config.inputs` into `config.output`.
///
/// Inputs are painted from last to first, so for every pixel the earliest
/// listed input holding valid data wins. Content already present in the
/// output is kept wherever no input has valid data.
pub fn merge_files(config: &MergeConfig) -> Result<()> {
    let first = config
        .inputs
        .first()
        .ok_or(MergeError::TooFewFiles(config.inputs.len() + 1))?;

    let template = {
        let dataset = io::open_input(first)?;
        io::extract_metadata(&dataset, first)?
    };

    info!(
        "Template {}: {}x{}, {} band(s), {:?}",
        first.display(),
        template.width,
        template.height,
        template.band_count,
        template.data_type
    );

    match template.data_type {
        GdalDataType::UInt8 => merge_as::<u8>(config, &template),
        GdalDataType::UInt16 => merge_as::<u16>(config, &template),
        GdalDataType::Int16 => merge_as::<i16>(config, &template),
        GdalDataType::UInt32 => merge_as::<u32>(config, &template),
        GdalDataType::Int32 => merge_as::<i32>(config, &template),
        GdalDataType::Float32 => merge_as::<f32>(config, &template),
        GdalDataType::Float64 => merge_as::<f64>(config, &template),
        other => Err(MergeError::UnsupportedDataType(format!("{:?}", other))),
    }
}

fn merge_as<T: Pixel>(config: &MergeConfig, template: &RasterMetadata) -> Result<()> {
    let output = config.output.as_path();
    let output_exists = output.exists();

    // The prior output, if any, is the bottom layer
    let (nodata, existing) = if output_exists {
        let dataset = io::open_input(output)?;
        let metadata = io::extract_metadata(&dataset, output)?;
        template.check_compatible(&metadata, output)?;
        if config.nodata.is_some() {
            warn!(
                "{} already exists, ignoring --nodata in favour of its nodata {:?}",
                output.display(),
                metadata.nodata()
            );
        }
        let layer = io::read_layer::<T>(&dataset, output)?;
        (metadata.nodata(), Some(layer))
    } else {
        (config.nodata.or(template.nodata()), None)
    };

    let sentinel = match nodata {
        Some(value) => T::from_nodata(value).ok_or(MergeError::InvalidNodata(value))?,
        None => {
            warn!("No nodata value defined, using {:?} as fill", T::default());
            T::default()
        }
    };

    let mut canvas = Canvas::new(template.shape(), sentinel);
    debug!(
        "Canvas {:?} filled with {:?}",
        canvas.data().dim(),
        canvas.nodata()
    );

    if let Some(layer) = existing {
        canvas.paint(&layer)?;
        debug!(
            "Seeded from existing output, {} nodata cell(s) left",
            canvas.nodata_count()
        );
    }

    for path in config.inputs.iter().rev() {
        info!("Merging {}", path.display());
        let dataset = io::open_input(path)?;
        let metadata = io::extract_metadata(&dataset, path)?;
        template.check_compatible(&metadata, path)?;

        let layer = io::read_layer::<T>(&dataset, path)?;
        drop(dataset);

        canvas.paint(&layer)?;
        debug!("{} nodata cell(s) left", canvas.nodata_count());
    }

    let mut dst = if output_exists {
        io::open_for_update(output)?
    } else {
        let driver = config.driver.as_deref().unwrap_or(&template.driver);
        io::create_output::<T>(output, template, driver, &config.creation_options, nodata)?
    };

    io::write_canvas(&mut dst, canvas.data())?;
    drop(dst);

    info!("Merged {} input(s) into {}", config.inputs.len(), output.display());
    Ok(())
}
