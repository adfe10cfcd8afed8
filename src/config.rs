use std::path::PathBuf;

use crate::cli::Args;
use crate::error::{MergeError, Result};

/// Everything a merge run needs, built once per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    /// Inputs in priority order (first wins).
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    /// GDAL driver short name for a newly created output.
    pub driver: Option<String>,
    pub nodata: Option<f64>,
    pub creation_options: Vec<String>,
    pub verbosity: Verbosity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Debug,
    Trace,
    /// Trace logging plus GDAL's own debug output
    GdalTrace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Debug,
            (false, 2) => Verbosity::Trace,
            (false, _) => Verbosity::GdalTrace,
        }
    }

    /// Default filter handed to env_logger when RUST_LOG is unset
    pub fn log_filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Debug => "debug",
            Verbosity::Trace | Verbosity::GdalTrace => "trace",
        }
    }

    pub fn gdal_debug(self) -> bool {
        self == Verbosity::GdalTrace
    }
}

impl MergeConfig {
    /// Split the positional paths into inputs and output, and validate options
    pub fn from_args(args: Args) -> Result<Self> {
        let mut files = args.files;
        if files.len() < 2 {
            return Err(MergeError::TooFewFiles(files.len()));
        }
        let output = files.pop().ok_or(MergeError::TooFewFiles(0))?;

        for option in &args.creation_options {
            validate_creation_option(option)?;
        }

        Ok(Self {
            inputs: files,
            output,
            driver: args.driver,
            nodata: args.nodata,
            creation_options: args.creation_options,
            verbosity: Verbosity::from_flags(args.verbose, args.quiet),
        })
    }
}

/// Creation options are passed to GDAL as NAME=VALUE pairs
pub fn validate_creation_option(option: &str) -> Result<()> {
    match option.split_once('=') {
        Some((name, _)) if !name.trim().is_empty() => Ok(()),
        _ => Err(MergeError::InvalidCreationOption(option.to_string())),
    }
}
