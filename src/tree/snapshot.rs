//! Hierarchical snapshot tree

use crate::types::ContentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A tree of named blobs, subtrees and commit references
///
/// Each tree owns its subtrees outright. Names are decoded segment names, and
/// the maps are ordered so that serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTree {
    pub id: ContentId,
    #[serde(default)]
    pub blobs: BTreeMap<String, ContentId>,
    #[serde(default)]
    pub trees: BTreeMap<String, SnapshotTree>,
    #[serde(default)]
    pub commits: BTreeMap<String, ContentId>,
}

impl SnapshotTree {
    /// Create an empty tree with the given id
    pub fn new(id: impl Into<ContentId>) -> Self {
        Self {
            id: id.into(),
            blobs: BTreeMap::new(),
            trees: BTreeMap::new(),
            commits: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty() && self.trees.is_empty() && self.commits.is_empty()
    }

    /// Find a subtree by its `/`-separated path of decoded names
    ///
    /// The empty path is this tree.
    pub fn get_tree(&self, path: &str) -> Option<&SnapshotTree> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('/')
            .try_fold(self, |tree, name| tree.trees.get(name))
    }

    /// Find a blob id by its `/`-separated path of decoded names
    pub fn blob_id(&self, path: &str) -> Option<&ContentId> {
        let (parent, name) = crate::tree::path::split_parent(path);
        self.get_tree(parent)?.blobs.get(name)
    }

    /// Find a commit reference by its `/`-separated path of decoded names
    pub fn commit_id(&self, path: &str) -> Option<&ContentId> {
        let (parent, name) = crate::tree::path::split_parent(path);
        self.get_tree(parent)?.commits.get(name)
    }

    /// Number of blobs in this tree and every subtree
    pub fn blob_count(&self) -> usize {
        self.blobs.len() + self.trees.values().map(SnapshotTree::blob_count).sum::<usize>()
    }

    /// Number of subtrees below this tree, not counting itself
    pub fn tree_count(&self) -> usize {
        self.trees.len() + self.trees.values().map(SnapshotTree::tree_count).sum::<usize>()
    }
}
