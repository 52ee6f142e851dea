//! Snaptree: snapshot trees for content-addressed document storage
//!
//! Rebuilds the hierarchical tree of a stored document snapshot from a flat,
//! breadth-first listing of content ids, and maps in-memory summary objects
//! onto the entry vocabulary a tree-serialization layer writes.

pub mod config;
pub mod entry;
pub mod error;
pub mod logging;
pub mod summary;
pub mod tree;
pub mod types;

pub use entry::{add_blob_to_tree, FileMode, Tree, TreeEntry, TreeEntryType};
pub use error::{ApiError, EntryError, SummaryError, TreeError};
pub use summary::{git_mode, git_type, GitObjectType, SummaryObject, SummaryType};
pub use tree::{build_hierarchy, HierarchyBuilder, ReverseIndex, SnapshotTree};
pub use types::{ContentId, EntryKind, FlatEntry, FlatTree};
