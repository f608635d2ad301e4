//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables
//! and default values.

use crate::config::AppConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use stampede_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix (e.g., `STAMPEDE__TTL__NULL_TTL_SECS`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Nested keys use a double underscore (e.g., STAMPEDE__STORE__PROVIDER)
        figment = figment.merge(
            Env::prefixed(&format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix))
                .split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string = to_toml(config)?;

        std::fs::write(path.as_ref(), toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Render configuration as pretty TOML
pub fn to_toml(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config to TOML")
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_store_config(config)?;
    validate_keys_config(config)?;
    validate_ttl_config(config)?;
    validate_rebuild_config(config)?;
    validate_retry_config(config)?;
    parse_log_level(&config.logging.level)?;
    Ok(())
}

fn validate_store_config(config: &AppConfig) -> Result<()> {
    if config.store.provider.trim().is_empty() {
        return Err(Error::configuration("Store provider cannot be empty"));
    }
    if config.store.max_capacity == 0 {
        return Err(Error::configuration("Store capacity cannot be 0"));
    }
    Ok(())
}

fn validate_keys_config(config: &AppConfig) -> Result<()> {
    config
        .keys
        .to_cache_keys()
        .map(|_| ())
        .map_err(|e| Error::configuration(format!("Invalid key namespaces: {e}")))
}

fn validate_ttl_config(config: &AppConfig) -> Result<()> {
    let ttl = &config.ttl;
    for (name, value) in [
        ("Entry TTL", ttl.entry_ttl_secs),
        ("Tombstone TTL", ttl.null_ttl_secs),
        ("Lock TTL", ttl.lock_ttl_secs),
        ("Logical TTL", ttl.logical_ttl_secs),
    ] {
        if value == 0 {
            return Err(Error::configuration(format!("{name} cannot be 0")));
        }
    }
    if ttl.null_ttl_secs >= ttl.entry_ttl_secs {
        return Err(Error::configuration(format!(
            "Tombstone TTL ({}s) must be shorter than entry TTL ({}s)",
            ttl.null_ttl_secs, ttl.entry_ttl_secs
        )));
    }
    Ok(())
}

fn validate_rebuild_config(config: &AppConfig) -> Result<()> {
    if config.rebuild.workers == 0 {
        return Err(Error::configuration("Rebuild workers cannot be 0"));
    }
    if config.rebuild.queue_capacity == 0 {
        return Err(Error::configuration("Rebuild queue capacity cannot be 0"));
    }
    Ok(())
}

fn validate_retry_config(config: &AppConfig) -> Result<()> {
    config
        .retry
        .to_policy()
        .validate()
        .map_err(|e| Error::configuration(format!("Invalid retry policy: {e}")))
}
