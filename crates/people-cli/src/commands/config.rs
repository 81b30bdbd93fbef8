use anyhow::{Context, Result};
use people_core::config::{ApiConfig, RootConfig};
use people_infrastructure::{ConfigService, PeoplePaths};
use std::path::Path;

/// Resolves the effective API configuration.
///
/// Precedence: `--base-url`, then environment, then the config file, then defaults.
pub fn resolve(config_path: Option<&Path>, base_url: Option<String>) -> Result<ApiConfig> {
    let service = match config_path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };

    let mut api = service
        .api_config()
        .context("Failed to load configuration")?;
    if let Some(url) = base_url {
        api.base_url = url;
    }

    tracing::debug!(base_url = %api.base_url, page_size = api.page_size, "resolved configuration");
    Ok(api)
}

pub fn show(config: &ApiConfig) -> Result<()> {
    let root = RootConfig {
        api: config.clone(),
    };
    let rendered = toml::to_string_pretty(&root).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}

pub fn path(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => PeoplePaths::config_file()?,
    };
    println!("{}", path.display());
    Ok(())
}
