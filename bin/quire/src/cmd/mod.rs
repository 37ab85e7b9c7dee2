//! CLI command implementations.

pub mod build;
pub mod check;
pub mod list;
pub mod search;
pub mod show;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use quire_core::Config;
use quire_generator::SiteBuild;

/// Load the configuration file, applying `QUIRE__*` environment overrides.
pub(crate) fn load_config(config_path: &Path) -> Result<Config> {
    let config = Config::load_with_env(config_path).wrap_err_with(|| {
        format!(
            "Failed to load configuration from {}",
            config_path.display()
        )
    })?;
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Load configuration and the full collection.
pub(crate) fn load_site(config_path: &Path) -> Result<SiteBuild> {
    let config = load_config(config_path)?;
    let content_dir = config.build.content_dir.clone();
    SiteBuild::load(config)
        .wrap_err_with(|| format!("Failed to load content from {content_dir}"))
}
