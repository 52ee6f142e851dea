//! Storage tree entries
//!
//! A [`Tree`] is the record a tree-serialization layer writes: an ordered list
//! of entries, each a blob, a nested tree or an external attachment. Every
//! entry kind has a fixed file mode and type tag.

use crate::error::EntryError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Default encoding for blob contents
pub const UTF8: &str = "utf-8";

/// Storage file mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FileMode {
    File,
    Directory,
}

impl FileMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileMode::File => "100644",
            FileMode::Directory => "040000",
        }
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for FileMode {
    type Error = EntryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "100644" => Ok(FileMode::File),
            "040000" => Ok(FileMode::Directory),
            _ => Err(EntryError::UnknownMode(value)),
        }
    }
}

impl From<FileMode> for String {
    fn from(mode: FileMode) -> Self {
        mode.as_str().to_string()
    }
}

/// Type tag of a tree entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TreeEntryType {
    Blob,
    Tree,
    Attachment,
}

impl TreeEntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TreeEntryType::Blob => "Blob",
            TreeEntryType::Tree => "Tree",
            TreeEntryType::Attachment => "Attachment",
        }
    }

    /// The only mode an entry of this type may carry
    pub fn mode(&self) -> FileMode {
        match self {
            TreeEntryType::Blob | TreeEntryType::Attachment => FileMode::File,
            TreeEntryType::Tree => FileMode::Directory,
        }
    }
}

impl fmt::Display for TreeEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for TreeEntryType {
    type Error = EntryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Blob" => Ok(TreeEntryType::Blob),
            "Tree" => Ok(TreeEntryType::Tree),
            "Attachment" => Ok(TreeEntryType::Attachment),
            _ => Err(EntryError::UnknownEntryType(value)),
        }
    }
}

impl From<TreeEntryType> for String {
    fn from(entry_type: TreeEntryType) -> Self {
        entry_type.as_str().to_string()
    }
}

/// Inline blob payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub contents: String,
    pub encoding: String,
}

/// Reference to a blob stored outside the tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
}

/// An ordered list of entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unreferenced: Option<bool>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<TreeEntry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Append a blob holding `content` encoded as JSON
    pub fn add_json_blob<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        content: &T,
    ) -> Result<(), EntryError> {
        add_blob_to_tree(self, name, content)
    }
}

/// A single entry of a [`Tree`]
///
/// Serialized as `{mode, path, type, value}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTreeEntry")]
pub enum TreeEntry {
    Blob { path: String, value: Blob },
    Tree { path: String, value: Tree },
    Attachment { path: String, value: Attachment },
}

impl TreeEntry {
    /// Blob entry with utf-8 contents
    pub fn blob(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self::blob_with_encoding(path, contents, UTF8)
    }

    pub fn blob_with_encoding(
        path: impl Into<String>,
        contents: impl Into<String>,
        encoding: impl Into<String>,
    ) -> Self {
        TreeEntry::Blob {
            path: path.into(),
            value: Blob {
                contents: contents.into(),
                encoding: encoding.into(),
            },
        }
    }

    /// Tree entry; the subtree moves into the entry
    pub fn tree(path: impl Into<String>, subtree: Tree) -> Self {
        TreeEntry::Tree {
            path: path.into(),
            value: subtree,
        }
    }

    pub fn attachment(path: impl Into<String>, id: impl Into<String>) -> Self {
        TreeEntry::Attachment {
            path: path.into(),
            value: Attachment { id: id.into() },
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeEntry::Blob { path, .. }
            | TreeEntry::Tree { path, .. }
            | TreeEntry::Attachment { path, .. } => path,
        }
    }

    pub fn entry_type(&self) -> TreeEntryType {
        match self {
            TreeEntry::Blob { .. } => TreeEntryType::Blob,
            TreeEntry::Tree { .. } => TreeEntryType::Tree,
            TreeEntry::Attachment { .. } => TreeEntryType::Attachment,
        }
    }

    pub fn mode(&self) -> FileMode {
        self.entry_type().mode()
    }
}

/// Append a utf-8 blob entry holding `content` serialized as JSON
///
/// Entries keep insertion order; an existing entry with the same name is left
/// in place.
pub fn add_blob_to_tree<T: Serialize + ?Sized>(
    tree: &mut Tree,
    name: impl Into<String>,
    content: &T,
) -> Result<(), EntryError> {
    let contents = serde_json::to_string(content)?;
    tree.entries.push(TreeEntry::blob(name, contents));
    Ok(())
}

/// Wire form of an entry, decoded once the type tag is known
#[derive(Debug, Deserialize)]
struct RawTreeEntry {
    mode: FileMode,
    path: String,
    #[serde(rename = "type")]
    entry_type: TreeEntryType,
    value: serde_json::Value,
}

impl TryFrom<RawTreeEntry> for TreeEntry {
    type Error = EntryError;

    fn try_from(raw: RawTreeEntry) -> Result<Self, Self::Error> {
        if raw.mode != raw.entry_type.mode() {
            return Err(EntryError::ModeMismatch {
                path: raw.path,
                entry_type: raw.entry_type.to_string(),
                mode: raw.mode.to_string(),
            });
        }

        let entry_type = raw.entry_type;
        let invalid = |source: serde_json::Error| EntryError::InvalidValue {
            entry_type: entry_type.to_string(),
            source,
        };
        let path = raw.path;
        let entry = match entry_type {
            TreeEntryType::Blob => TreeEntry::Blob {
                path,
                value: serde_json::from_value(raw.value).map_err(invalid)?,
            },
            TreeEntryType::Tree => TreeEntry::Tree {
                path,
                value: serde_json::from_value(raw.value).map_err(invalid)?,
            },
            TreeEntryType::Attachment => TreeEntry::Attachment {
                path,
                value: serde_json::from_value(raw.value).map_err(invalid)?,
            },
        };
        Ok(entry)
    }
}

impl Serialize for TreeEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TreeEntry", 4)?;
        state.serialize_field("mode", &self.mode())?;
        state.serialize_field("path", self.path())?;
        state.serialize_field("type", &self.entry_type())?;
        match self {
            TreeEntry::Blob { value, .. } => state.serialize_field("value", value)?,
            TreeEntry::Tree { value, .. } => state.serialize_field("value", value)?,
            TreeEntry::Attachment { value, .. } => state.serialize_field("value", value)?,
        }
        state.end()
    }
}
