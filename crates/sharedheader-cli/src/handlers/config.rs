use crate::cli::ConfigFormat;
use crate::output;
use sharedheader_core::{PagerConfig, PagerResult};
use std::path::Path;

/// Config from `path` when given, otherwise from the user config dir with defaults as fallback.
pub fn load(path: Option<&Path>) -> PagerResult<PagerConfig> {
    let config = match path {
        Some(path) => PagerConfig::load_from(path)?,
        None => PagerConfig::load(),
    };
    config.validate()?;
    Ok(config)
}

pub fn handle(config: &PagerConfig, format: ConfigFormat) -> anyhow::Result<()> {
    match format {
        ConfigFormat::Json => output::output_success(config),
        ConfigFormat::Toml => print!("{}", config.to_toml()?),
    }
    Ok(())
}
