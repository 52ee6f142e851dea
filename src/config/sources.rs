//! Configuration sources: an optional TOML file, then `SNAPTREE_*` variables.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use std::path::Path;

/// Prefix for environment overrides, e.g. `SNAPTREE_HIERARCHY__STRIP_LEGACY_PREFIX`
pub const ENV_PREFIX: &str = "SNAPTREE";

/// Add a config file to the builder. A missing file is an error only when `required`.
pub fn add_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> ConfigBuilder<DefaultState> {
    let name = path.to_string_lossy();
    builder.add_source(File::new(&name, FileFormat::Toml).required(required))
}

/// Add environment overrides; `__` separates nested keys.
pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
