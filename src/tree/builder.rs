//! Hierarchy builder for turning flat listings into snapshot trees

use crate::config::HierarchyConfig;
use crate::error::TreeError;
use crate::tree::index::ReverseIndex;
use crate::tree::path;
use crate::tree::snapshot::SnapshotTree;
use crate::types::{ContentId, EntryKind, FlatTree};
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;
use tracing::{debug, error, instrument, trace};

const ROOT: usize = 0;

/// A tree under construction; subtrees are arena indices
#[derive(Debug)]
struct PendingTree {
    id: ContentId,
    blobs: BTreeMap<String, ContentId>,
    trees: BTreeMap<String, usize>,
    commits: BTreeMap<String, ContentId>,
}

impl PendingTree {
    fn new(id: ContentId) -> Self {
        Self {
            id,
            blobs: BTreeMap::new(),
            trees: BTreeMap::new(),
            commits: BTreeMap::new(),
        }
    }
}

/// Arena of pending trees plus the path-keyed lookup table
///
/// A tree is always pushed after its parent, so every child index is greater
/// than its parent's.
struct Arena {
    nodes: Vec<PendingTree>,
    lookup: HashMap<String, usize>,
}

impl Arena {
    fn new(root_id: ContentId) -> Self {
        let mut lookup = HashMap::new();
        lookup.insert(String::new(), ROOT);
        Self {
            nodes: vec![PendingTree::new(root_id)],
            lookup,
        }
    }

    fn push(&mut self, path: &str, id: ContentId) -> usize {
        let index = self.nodes.len();
        self.nodes.push(PendingTree::new(id));
        self.lookup.insert(path.to_string(), index);
        index
    }

    /// Assemble owned trees from the leaves up and return the root
    fn into_root(mut self) -> SnapshotTree {
        let mut finished: HashMap<usize, SnapshotTree> = HashMap::new();

        while let Some(node) = self.nodes.pop() {
            let index = self.nodes.len();
            let trees = node
                .trees
                .into_iter()
                .filter_map(|(name, child)| finished.remove(&child).map(|tree| (name, tree)))
                .collect();
            let tree = SnapshotTree {
                id: node.id,
                blobs: node.blobs,
                trees,
                commits: node.commits,
            };
            if index == ROOT {
                return tree;
            }
            finished.insert(index, tree);
        }

        unreachable!("arena always holds a root node")
    }
}

/// Builder for reconstructing a snapshot tree from a breadth-first listing
#[derive(Debug, Clone, Default)]
pub struct HierarchyBuilder {
    strip_legacy_prefix: bool,
}

impl HierarchyBuilder {
    /// Create a builder that keeps paths as listed
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &HierarchyConfig) -> Self {
        Self {
            strip_legacy_prefix: config.strip_legacy_prefix,
        }
    }

    /// Remove a leading `.app/` from every path before placing it
    pub fn with_legacy_prefix_stripping(mut self, strip: bool) -> Self {
        self.strip_legacy_prefix = strip;
        self
    }

    /// Build the hierarchy in a single pass over the listing
    ///
    /// Every blob is also recorded in `reverse_index` as `/` followed by its
    /// (stripped) path. The listing must name each directory before anything
    /// inside it; a child whose parent has not been seen aborts the build.
    #[instrument(skip_all, fields(root = %flat.sha, entries = flat.tree.len()))]
    pub fn build(
        &self,
        flat: &FlatTree,
        reverse_index: &mut ReverseIndex,
    ) -> Result<SnapshotTree, TreeError> {
        let start = Instant::now();
        let mut arena = Arena::new(flat.sha.clone());

        for entry in &flat.tree {
            let entry_path = if self.strip_legacy_prefix {
                path::strip_legacy_prefix(&entry.path)
            } else {
                entry.path.as_str()
            };
            let (parent_path, leaf) = path::split_parent(entry_path);

            let Some(&parent) = arena.lookup.get(parent_path) else {
                error!(path = %entry_path, parent = %parent_path, "Parent tree not yet seen");
                return Err(TreeError::OrderingViolation {
                    path: entry_path.to_string(),
                    parent: parent_path.to_string(),
                });
            };

            let name = path::decode_segment(leaf)?.into_owned();
            trace!(path = %entry_path, kind = %entry.kind, "Placing entry");

            let replaced = match entry.kind {
                EntryKind::Tree => {
                    let child = arena.push(entry_path, entry.id.clone());
                    arena.nodes[parent].trees.insert(name, child).is_some()
                }
                EntryKind::Blob => {
                    reverse_index.record(entry.id.clone(), format!("/{}", entry_path));
                    arena.nodes[parent]
                        .blobs
                        .insert(name, entry.id.clone())
                        .is_some()
                }
                EntryKind::Commit => arena.nodes[parent]
                    .commits
                    .insert(name, entry.id.clone())
                    .is_some(),
            };
            if replaced {
                debug!(path = %entry_path, "Duplicate entry name overwrote an earlier entry");
            }
        }

        let tree_count = arena.nodes.len();
        let root = arena.into_root();

        debug!(
            trees = tree_count,
            indexed_blobs = reverse_index.len(),
            duration_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            "Hierarchy build completed"
        );

        Ok(root)
    }
}

/// Build a snapshot tree from a flat listing
///
/// Convenience wrapper around [`HierarchyBuilder`].
pub fn build_hierarchy(
    flat: &FlatTree,
    reverse_index: &mut ReverseIndex,
    strip_legacy_prefix: bool,
) -> Result<SnapshotTree, TreeError> {
    HierarchyBuilder::new()
        .with_legacy_prefix_stripping(strip_legacy_prefix)
        .build(flat, reverse_index)
}
