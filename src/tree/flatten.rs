//! Flatten a snapshot tree back into a breadth-first listing

use crate::tree::path;
use crate::tree::snapshot::SnapshotTree;
use crate::types::{FlatEntry, FlatTree};
use std::collections::VecDeque;

impl SnapshotTree {
    /// Produce the breadth-first listing that rebuilds this tree
    ///
    /// Segment names are percent-encoded. Within one directory, subtrees are
    /// listed first, then blobs, then commits, each in name order.
    pub fn flatten(&self) -> FlatTree {
        let mut entries = Vec::new();
        let mut queue: VecDeque<(String, &SnapshotTree)> = VecDeque::new();
        queue.push_back((String::new(), self));

        while let Some((prefix, tree)) = queue.pop_front() {
            for (name, subtree) in &tree.trees {
                let entry_path = path::join(&prefix, &path::encode_segment(name));
                entries.push(FlatEntry::tree(entry_path.clone(), subtree.id.clone()));
                queue.push_back((entry_path, subtree));
            }
            for (name, id) in &tree.blobs {
                let entry_path = path::join(&prefix, &path::encode_segment(name));
                entries.push(FlatEntry::blob(entry_path, id.clone()));
            }
            for (name, id) in &tree.commits {
                let entry_path = path::join(&prefix, &path::encode_segment(name));
                entries.push(FlatEntry::commit(entry_path, id.clone()));
            }
        }

        FlatTree::new(self.id.clone(), entries)
    }
}
