use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "rio-merge")]
#[command(about = "Merge a stack of raster datasets")]
#[command(
    long_about = "Copy valid pixels from input files to an output file.\n\n\
All files must have the same shape, number of bands, and data type. \
Input files are merged in their listed order using a reverse painter's \
algorithm: earlier files win wherever they hold valid data."
)]
#[command(version)]
pub struct Args {
    /// Input rasters followed by the output raster
    #[arg(value_name = "FILES", required = true, num_args = 2..)]
    pub files: Vec<PathBuf>,

    /// Output format driver (default: driver of the first input)
    #[arg(short = 'f', long = "format", visible_alias = "driver", value_name = "DRIVER")]
    pub driver: Option<String>,

    /// Nodata value for a newly created output (default: read from first input)
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub nodata: Option<f64>,

    /// Driver specific creation option, may be repeated
    #[arg(long = "co", value_name = "NAME=VALUE")]
    pub creation_options: Vec<String>,

    /// Increase verbosity (-v debug, -vv trace, -vvv also GDAL debug output)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}
