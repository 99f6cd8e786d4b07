use anyhow::{Context, Result};
use mobility_pipeline::DataConfig;
use tracing::debug;

pub mod check;
pub mod convert;
pub mod country;
pub mod day;
pub mod towers;

/// Load the config named on the command line (or the defaults) and apply flag overrides.
pub(crate) fn load_config(cli: &crate::cli::Cli) -> Result<DataConfig> {
    let mut config = match &cli.config {
        Some(path) => DataConfig::from_json(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DataConfig::default(),
    };
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    config.validate()?;
    debug!(data_dir = %config.data_dir.display(), prefix = %config.tower_prefix, "loaded config");
    Ok(config)
}
