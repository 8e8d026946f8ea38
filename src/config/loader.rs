//! Configuration Loader
//!
//! Environment-aware loading: discovers the config directory, merges the
//! environment file over the defaults and applies environment variables.

use super::AuditConfig;
use crate::error::{AuditError, Result};
use config::{Config, Environment, File};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const ENV_PREFIX: &str = "AUDIT";

/// Loaded configuration together with the environment it was loaded for
#[derive(Debug)]
pub struct ConfigManager {
    config: AuditConfig,
    environment: String,
}

impl ConfigManager {
    /// Load configuration with environment auto-detection
    pub fn load() -> Result<Arc<ConfigManager>> {
        Self::load_from_directory(None)
    }

    /// Load configuration from a specific directory
    pub fn load_from_directory(config_dir: Option<PathBuf>) -> Result<Arc<ConfigManager>> {
        let environment = Self::detect_environment();
        Self::load_from_directory_with_env(config_dir, &environment)
    }

    /// Load configuration from a specific directory with explicit environment
    pub fn load_from_directory_with_env(
        config_dir: Option<PathBuf>,
        environment: &str,
    ) -> Result<Arc<ConfigManager>> {
        let config_directory = config_dir.unwrap_or_else(Self::default_config_directory);

        debug!(
            environment = environment,
            directory = %config_directory.display(),
            "Loading configuration"
        );

        let config = Self::load_and_merge_config(&config_directory, environment)?;
        config.validate()?;

        info!(
            environment = environment,
            database = %config.database.redacted_url(),
            bind_address = %config.web.bind_address,
            top_n = config.analytics.top_n,
            "Configuration loaded successfully"
        );

        Ok(Arc::new(ConfigManager {
            config,
            environment: environment.to_string(),
        }))
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Current environment: `AUDIT_ENV`, then `APP_ENV`, else development
    pub fn detect_environment() -> String {
        env::var("AUDIT_ENV")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string())
    }

    fn default_config_directory() -> PathBuf {
        if let Ok(dir) = env::var("AUDIT_CONFIG_DIR") {
            return PathBuf::from(dir);
        }

        let candidates = [
            env::var("CARGO_MANIFEST_DIR")
                .ok()
                .map(|root| PathBuf::from(root).join("config")),
            Some(PathBuf::from("config")),
        ];

        for dir in candidates.into_iter().flatten() {
            if dir.is_dir() {
                debug!(directory = %dir.display(), "Found config directory");
                return dir;
            }
        }

        PathBuf::from("config")
    }

    fn load_and_merge_config(config_directory: &Path, environment: &str) -> Result<AuditConfig> {
        let builder = Config::builder()
            .add_source(File::from(config_directory.join("default.yaml")).required(false))
            .add_source(
                File::from(config_directory.join(format!("{environment}.yaml"))).required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?;

        let merged = builder.build()?;
        merged.try_deserialize::<AuditConfig>().map_err(|e| {
            AuditError::ConfigurationError(format!(
                "Failed to parse configuration for environment '{environment}': {e}"
            ))
        })
    }
}
