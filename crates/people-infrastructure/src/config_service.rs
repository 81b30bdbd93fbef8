//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` in the platform config
//! directory (or an explicit path) and layers environment overrides on top.

use crate::paths::PeoplePaths;
use people_core::config::{ApiConfig, RootConfig};
use people_core::{DirectoryError, Result};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Overrides `ApiConfig::base_url`.
pub const ENV_API_URL: &str = "PEOPLE_API_URL";
/// Overrides `ApiConfig::api_key`.
pub const ENV_API_KEY: &str = "PEOPLE_API_KEY";
/// Overrides `ApiConfig::page_size`.
pub const ENV_PAGE_SIZE: &str = "PEOPLE_PAGE_SIZE";

/// Configuration service that loads and caches the root configuration.
///
/// A missing file is not an error: defaults are used instead.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config path; `None` resolves via [`PeoplePaths`]
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the default config file.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading the given file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Returns the API configuration with process environment overrides applied.
    pub fn api_config(&self) -> Result<ApiConfig> {
        let api = self.get_config()?.api;
        Ok(apply_env_overrides(api, |key| std::env::var(key).ok()))
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    fn load_config(&self) -> Result<RootConfig> {
        let config_path = self.config_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "config file not found, using defaults");
            return Ok(RootConfig::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: RootConfig = toml::from_str(&content).map_err(|e| {
            DirectoryError::config(format!(
                "Failed to parse configuration file at {}: {}",
                config_path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded config file");
        Ok(config)
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => PeoplePaths::config_file().map_err(|e| DirectoryError::config(e.to_string())),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies environment overrides using `lookup` to read variables.
///
/// An unparsable page size is ignored with a warning.
pub fn apply_env_overrides<F>(mut api: ApiConfig, lookup: F) -> ApiConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        api.base_url = url;
    }

    if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
        api.api_key = key;
    }

    if let Some(raw) = lookup(ENV_PAGE_SIZE) {
        match raw.trim().parse::<u32>() {
            Ok(size) if size > 0 => api.page_size = size,
            _ => tracing::warn!(value = %raw, "ignoring invalid {}", ENV_PAGE_SIZE),
        }
    }

    api
}

#[cfg(test)]
mod tests {
    use super::*;
    use people_core::config::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        let config = service.get_config().expect("Should fall back to defaults");
        assert_eq!(config, RootConfig::default());
    }

    #[test]
    fn test_loads_and_caches_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://localhost:3000/api\"\npage_size = 12\n",
        )
        .unwrap();

        let service = ConfigService::with_path(&path);
        let config = service.get_config().unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.page_size, 12);

        // Cached value survives file removal until invalidated
        std::fs::remove_file(&path).unwrap();
        assert_eq!(service.get_config().unwrap().api.page_size, 12);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().api.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let err = ConfigService::with_path(&path).get_config().unwrap_err();
        assert!(matches!(err, DirectoryError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, "http://staging.test/api"),
            (ENV_API_KEY, "secret"),
            (ENV_PAGE_SIZE, "3"),
        ]);

        let api = apply_env_overrides(ApiConfig::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert_eq!(api.base_url, "http://staging.test/api");
        assert_eq!(api.api_key, "secret");
        assert_eq!(api.page_size, 3);
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let env: HashMap<&str, &str> = HashMap::from([(ENV_API_URL, " "), (ENV_PAGE_SIZE, "zero")]);

        let api = apply_env_overrides(ApiConfig::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert_eq!(api.base_url, DEFAULT_BASE_URL);
        assert_eq!(api.page_size, DEFAULT_PAGE_SIZE);
    }
}
