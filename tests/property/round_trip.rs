//! Property-based tests: flatten then rebuild is the identity

use proptest::collection::btree_map;
use proptest::prelude::*;
use snaptree::{build_hierarchy, ContentId, EntryKind, ReverseIndex, SnapshotTree};
use std::collections::BTreeMap;

fn content_id() -> impl Strategy<Value = ContentId> {
    "[0-9a-f]{8}".prop_map(ContentId::from)
}

/// Segment names, including characters that need percent-encoding
fn name() -> impl Strategy<Value = String> {
    "[a-zé .%/_-]{1,6}"
}

fn snapshot_tree() -> impl Strategy<Value = SnapshotTree> {
    let leaf = (
        content_id(),
        btree_map(name(), content_id(), 0..3),
        btree_map(name(), content_id(), 0..2),
    )
        .prop_map(|(id, blobs, commits)| SnapshotTree {
            id,
            blobs,
            trees: BTreeMap::new(),
            commits,
        });

    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            content_id(),
            btree_map(name(), content_id(), 0..3),
            btree_map(name(), inner, 0..4),
            btree_map(name(), content_id(), 0..2),
        )
            .prop_map(|(id, blobs, trees, commits)| SnapshotTree {
                id,
                blobs,
                trees,
                commits,
            })
    })
}

/// Test that any tree survives a flatten/rebuild cycle unchanged
#[test]
fn test_flatten_rebuild_identity_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&snapshot_tree(), |tree| {
            let flat = tree.flatten();
            let mut index = ReverseIndex::new();
            let rebuilt = build_hierarchy(&flat, &mut index, false).unwrap();

            prop_assert_eq!(rebuilt, tree);
            Ok(())
        })
        .unwrap();
}

/// Test that every blob path in a listing resolves through the reverse index
#[test]
fn test_reverse_index_points_at_last_listed_path_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&snapshot_tree(), |tree| {
            let flat = tree.flatten();
            let mut index = ReverseIndex::new();
            build_hierarchy(&flat, &mut index, false).unwrap();

            let mut expected: BTreeMap<&ContentId, String> = BTreeMap::new();
            for entry in flat.tree.iter().filter(|e| e.kind == EntryKind::Blob) {
                expected.insert(&entry.id, format!("/{}", entry.path));
            }

            prop_assert_eq!(index.len(), expected.len());
            for (id, path) in expected {
                prop_assert_eq!(index.path_of(id), Some(path.as_str()));
            }
            Ok(())
        })
        .unwrap();
}

/// Test that stripping is a no-op for listings without the legacy prefix
#[test]
fn test_stripping_without_prefix_is_noop_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&snapshot_tree(), |tree| {
            let flat = tree.flatten();
            prop_assume!(!flat.tree.iter().any(|e| e.path.starts_with(".app/")));

            let mut plain_index = ReverseIndex::new();
            let plain = build_hierarchy(&flat, &mut plain_index, false).unwrap();
            let mut stripped_index = ReverseIndex::new();
            let stripped = build_hierarchy(&flat, &mut stripped_index, true).unwrap();

            prop_assert_eq!(plain, stripped);
            prop_assert_eq!(plain_index, stripped_index);
            Ok(())
        })
        .unwrap();
}
