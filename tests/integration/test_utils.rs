//! Shared fixtures for integration tests

use snaptree::{FlatEntry, FlatTree, SnapshotTree};
use std::sync::{Mutex, MutexGuard};

/// Serializes tests that read or mutate process environment variables
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Environment variables set for the lifetime of the guard
///
/// Holds [`ENV_LOCK`] and removes every variable it set on drop.
pub struct EnvGuard {
    keys: Vec<String>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn set(vars: &[(&str, &str)]) -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        Self {
            keys: vars.iter().map(|(key, _)| key.to_string()).collect(),
            _lock: lock,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            std::env::remove_var(key);
        }
    }
}

/// Hand-built tree three levels deep with every kind of child
///
/// ```text
/// R0
/// ├── docs/            (T1)
/// │   ├── readme.md    (B1)
/// │   └── api v2/      (T2)
/// │       ├── spec.json (B2)
/// │       └── vendor/  (T3)
/// │           ├── lib.rs (B3)
/// │           └── dep    (C2)
/// ├── .attributes      (B0)
/// └── ext              (C1)
/// ```
pub fn nested_tree() -> SnapshotTree {
    let mut vendor = SnapshotTree::new("T3");
    vendor.blobs.insert("lib.rs".to_string(), "B3".into());
    vendor.commits.insert("dep".to_string(), "C2".into());

    let mut api = SnapshotTree::new("T2");
    api.blobs.insert("spec.json".to_string(), "B2".into());
    api.trees.insert("vendor".to_string(), vendor);

    let mut docs = SnapshotTree::new("T1");
    docs.blobs.insert("readme.md".to_string(), "B1".into());
    docs.trees.insert("api v2".to_string(), api);

    let mut root = SnapshotTree::new("R0");
    root.trees.insert("docs".to_string(), docs);
    root.blobs.insert(".attributes".to_string(), "B0".into());
    root.commits.insert("ext".to_string(), "C1".into());
    root
}

/// Listing for the scenario `dir` / `dir/file.txt` / `dir/sub` / `dir/sub/mod`
pub fn scenario_listing() -> FlatTree {
    FlatTree::new(
        "R0",
        vec![
            FlatEntry::tree("dir", "T1"),
            FlatEntry::blob("dir/file.txt", "B1"),
            FlatEntry::tree("dir/sub", "T2"),
            FlatEntry::commit("dir/sub/mod", "C1"),
        ],
    )
}
