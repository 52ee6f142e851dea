//! Snapshot trees
//!
//! Rebuilds the nested tree of a stored document snapshot from the flat,
//! breadth-first listing a storage backend returns, and flattens it back.

pub mod builder;
pub mod flatten;
pub mod index;
pub mod path;
pub mod snapshot;

pub use builder::{build_hierarchy, HierarchyBuilder};
pub use index::ReverseIndex;
pub use snapshot::SnapshotTree;
