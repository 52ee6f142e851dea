//! Shared types for flat listings and content identifiers

use crate::error::TreeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque content identifier (typically a git SHA)
///
/// Identifiers are computed elsewhere; this crate only carries them around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ContentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Kind of object a flat entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EntryKind {
    Blob,
    Tree,
    Commit,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Blob => "blob",
            EntryKind::Tree => "tree",
            EntryKind::Commit => "commit",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blob" => Ok(EntryKind::Blob),
            "tree" => Ok(EntryKind::Tree),
            "commit" => Ok(EntryKind::Commit),
            other => Err(TreeError::UnknownEntryKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for EntryKind {
    type Error = TreeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntryKind> for String {
    fn from(kind: EntryKind) -> Self {
        kind.as_str().to_string()
    }
}

/// One record of a recursive tree listing
///
/// Extra fields a storage backend includes (`mode`, `size`, `url`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEntry {
    pub path: String,
    #[serde(rename = "sha")]
    pub id: ContentId,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl FlatEntry {
    pub fn new(path: impl Into<String>, id: impl Into<ContentId>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            id: id.into(),
            kind,
        }
    }

    pub fn blob(path: impl Into<String>, id: impl Into<ContentId>) -> Self {
        Self::new(path, id, EntryKind::Blob)
    }

    pub fn tree(path: impl Into<String>, id: impl Into<ContentId>) -> Self {
        Self::new(path, id, EntryKind::Tree)
    }

    pub fn commit(path: impl Into<String>, id: impl Into<ContentId>) -> Self {
        Self::new(path, id, EntryKind::Commit)
    }
}

/// A breadth-first listing of every entry below a root tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatTree {
    /// Content id of the root tree
    pub sha: ContentId,
    /// Entries, parents before children
    pub tree: Vec<FlatEntry>,
}

impl FlatTree {
    pub fn new(sha: impl Into<ContentId>, tree: Vec<FlatEntry>) -> Self {
        Self {
            sha: sha.into(),
            tree,
        }
    }
}
