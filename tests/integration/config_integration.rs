//! Integration tests for configuration loading

use super::test_utils::EnvGuard;
use snaptree::config::{ConfigLoader, SnaptreeConfig};
use snaptree::{FlatEntry, FlatTree, HierarchyBuilder, ReverseIndex};
use tempfile::TempDir;

/// Test that a loaded config drives the hierarchy builder
#[test]
fn test_config_enables_prefix_stripping() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("snaptree.toml");
    std::fs::write(
        &config_file,
        r#"
[hierarchy]
strip_legacy_prefix = true
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let builder = HierarchyBuilder::from_config(&config.hierarchy);

    let flat = FlatTree::new("R0", vec![FlatEntry::blob(".app/header", "B1")]);
    let mut index = ReverseIndex::new();
    let root = builder.build(&flat, &mut index).unwrap();

    assert!(root.blobs.contains_key("header"));
    assert_eq!(index.path_of(&"B1".into()), Some("/header"));
}

/// Test that an empty file yields the defaults
#[test]
fn test_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("snaptree.toml");
    std::fs::write(&config_file, "").unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert_eq!(config, SnaptreeConfig::default());
}

/// Test that a missing optional file is skipped
#[test]
fn test_load_skips_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let _env = EnvGuard::set(&[]);
    let config = ConfigLoader::load(Some(&missing)).unwrap();
    assert_eq!(config.logging.format, "text");
}

/// Test that environment variables override the config file
#[test]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("snaptree.toml");
    std::fs::write(
        &config_file,
        r#"
[hierarchy]
strip_legacy_prefix = false

[logging]
level = "warn"
"#,
    )
    .unwrap();

    let _env = EnvGuard::set(&[
        ("SNAPTREE_HIERARCHY__STRIP_LEGACY_PREFIX", "true"),
        ("SNAPTREE_LOGGING__LEVEL", "debug"),
        ("SNAPTREE_LOG", "trace"),
        ("SNAPTREE_LOG_FORMAT", "json"),
    ]);

    let config = ConfigLoader::load(Some(&config_file)).unwrap();
    assert!(config.hierarchy.strip_legacy_prefix);
    assert_eq!(config.logging.level, "debug");
    // Logging subscriber variables are not config keys
    assert_eq!(config.logging.format, "text");

    // The file alone, without environment overrides
    let file_only = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(!file_only.hierarchy.strip_legacy_prefix);
    assert_eq!(file_only.logging.level, "warn");
}
