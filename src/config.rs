//! Configuration System
//!
//! Layered configuration for embedding applications: merge-policy defaults,
//! then an optional TOML file, then `SNAPTREE_*` environment variables.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge_policy;
mod sources;

pub use sources::ENV_PREFIX;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnaptreeConfig {
    /// Hierarchy builder settings
    #[serde(default)]
    pub hierarchy: HierarchyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for rebuilding snapshot trees
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Remove a leading `.app/` from listing paths
    #[serde(default)]
    pub strip_legacy_prefix: bool,
}

impl SnaptreeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        self.logging
            .validate()
            .map_err(|e| ApiError::ConfigError(format!("logging: {}", e)))
    }
}

/// Loads [`SnaptreeConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, an optional config file and environment overrides
    ///
    /// A `config_file` that does not exist is skipped.
    pub fn load(config_file: Option<&Path>) -> Result<SnaptreeConfig, ApiError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        if let Some(path) = config_file {
            builder = sources::add_file(builder, path, false);
        }
        builder = sources::add_environment(builder);

        let config: SnaptreeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load a single config file over the defaults, without environment overrides
    ///
    /// The file must exist.
    pub fn load_from_file(path: &Path) -> Result<SnaptreeConfig, ApiError> {
        let builder = sources::add_file(merge_policy::builder_with_defaults()?, path, true);
        let config: SnaptreeConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
