use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{debug, error, info};

use rio_merge::cli::Args;
use rio_merge::{merge_files, MergeConfig, Result, Verbosity};

fn main() -> ExitCode {
    let config = MergeConfig::from_args(Args::parse());

    // Initialize logger before reporting any configuration error
    let verbosity = config
        .as_ref()
        .map(|c| c.verbosity)
        .unwrap_or_default();
    init_logging(verbosity);

    match config.and_then(|c| run(&c)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::from_env(Env::default().default_filter_or(verbosity.log_filter())).init();
}

fn run(config: &MergeConfig) -> Result<()> {
    if config.verbosity.gdal_debug() {
        gdal::config::set_config_option("CPL_DEBUG", "ON")?;
        debug!("GDAL debug output enabled");
    }

    info!(
        "Merging {} input(s) into {}",
        config.inputs.len(),
        config.output.display()
    );

    merge_files(config)
}
