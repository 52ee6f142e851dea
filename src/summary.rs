//! Summary objects and their storage classification
//!
//! A summary is the in-memory form of content about to be persisted. Before it
//! is written each object is classified into the storage vocabulary: a file
//! mode and a `blob`/`tree` object type. Handles are resolved to the type they
//! point at before classifying.

use crate::entry::FileMode;
use crate::error::SummaryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Summary type tag, with its wire code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SummaryType {
    Tree,
    Blob,
    Handle,
    Attachment,
}

impl SummaryType {
    pub fn code(&self) -> u8 {
        match self {
            SummaryType::Tree => 1,
            SummaryType::Blob => 2,
            SummaryType::Handle => 3,
            SummaryType::Attachment => 4,
        }
    }
}

impl TryFrom<u8> for SummaryType {
    type Error = SummaryError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(SummaryType::Tree),
            2 => Ok(SummaryType::Blob),
            3 => Ok(SummaryType::Handle),
            4 => Ok(SummaryType::Attachment),
            other => Err(SummaryError::UnrecognizedVariant(format!(
                "summary type code {}",
                other
            ))),
        }
    }
}

impl From<SummaryType> for u8 {
    fn from(summary_type: SummaryType) -> Self {
        summary_type.code()
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SummaryType::Tree => "tree",
            SummaryType::Blob => "blob",
            SummaryType::Handle => "handle",
            SummaryType::Attachment => "attachment",
        };
        f.write_str(name)
    }
}

/// Git object type a summary object is stored as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitObjectType {
    Blob,
    Tree,
}

impl GitObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GitObjectType::Blob => "blob",
            GitObjectType::Tree => "tree",
        }
    }
}

impl fmt::Display for GitObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blob contents: text or raw bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlobContent {
    Text(String),
    Binary(Vec<u8>),
}

/// Content destined for persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSummaryObject", into = "RawSummaryObject")]
pub enum SummaryObject {
    Tree(SummaryTree),
    Blob {
        content: BlobContent,
    },
    /// Reference to an object already stored by a previous summary
    Handle {
        handle_type: SummaryType,
        handle: String,
    },
    /// Blob stored outside the summary, referenced by id
    Attachment {
        id: String,
    },
}

/// Named children of a summary tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTree {
    pub tree: BTreeMap<String, SummaryObject>,
    pub unreferenced: Option<bool>,
}

impl SummaryObject {
    pub fn blob(content: impl Into<String>) -> Self {
        SummaryObject::Blob {
            content: BlobContent::Text(content.into()),
        }
    }

    pub fn handle(handle_type: SummaryType, handle: impl Into<String>) -> Self {
        SummaryObject::Handle {
            handle_type,
            handle: handle.into(),
        }
    }

    pub fn attachment(id: impl Into<String>) -> Self {
        SummaryObject::Attachment { id: id.into() }
    }

    pub fn summary_type(&self) -> SummaryType {
        match self {
            SummaryObject::Tree(_) => SummaryType::Tree,
            SummaryObject::Blob { .. } => SummaryType::Blob,
            SummaryObject::Handle { .. } => SummaryType::Handle,
            SummaryObject::Attachment { .. } => SummaryType::Attachment,
        }
    }

    /// The type this object stands for, looking through a handle
    pub fn resolved_type(&self) -> SummaryType {
        match self {
            SummaryObject::Handle { handle_type, .. } => *handle_type,
            other => other.summary_type(),
        }
    }
}

/// Storage file mode for a summary object
pub fn git_mode(value: &SummaryObject) -> Result<FileMode, SummaryError> {
    match value.resolved_type() {
        SummaryType::Blob | SummaryType::Attachment => Ok(FileMode::File),
        SummaryType::Tree => Ok(FileMode::Directory),
        SummaryType::Handle => Err(unresolved_handle(value)),
    }
}

/// Storage object type for a summary object
pub fn git_type(value: &SummaryObject) -> Result<GitObjectType, SummaryError> {
    match value.resolved_type() {
        SummaryType::Blob | SummaryType::Attachment => Ok(GitObjectType::Blob),
        SummaryType::Tree => Ok(GitObjectType::Tree),
        SummaryType::Handle => Err(unresolved_handle(value)),
    }
}

fn unresolved_handle(value: &SummaryObject) -> SummaryError {
    let handle = match value {
        SummaryObject::Handle { handle, .. } => handle.as_str(),
        _ => "",
    };
    SummaryError::UnrecognizedVariant(format!("handle {:?} resolves to another handle", handle))
}

/// Wire form: a numeric `type` tag plus the fields of every variant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSummaryObject {
    #[serde(rename = "type")]
    summary_type: SummaryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<BlobContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tree: Option<BTreeMap<String, SummaryObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unreferenced: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    handle_type: Option<SummaryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl TryFrom<RawSummaryObject> for SummaryObject {
    type Error = SummaryError;

    fn try_from(raw: RawSummaryObject) -> Result<Self, Self::Error> {
        let summary_type = raw.summary_type;
        let missing = |field: &str| {
            SummaryError::UnrecognizedVariant(format!(
                "{} object without `{}`",
                summary_type, field
            ))
        };

        match summary_type {
            SummaryType::Tree => Ok(SummaryObject::Tree(SummaryTree {
                tree: raw.tree.ok_or_else(|| missing("tree"))?,
                unreferenced: raw.unreferenced,
            })),
            SummaryType::Blob => Ok(SummaryObject::Blob {
                content: raw.content.ok_or_else(|| missing("content"))?,
            }),
            SummaryType::Handle => Ok(SummaryObject::Handle {
                handle_type: raw.handle_type.ok_or_else(|| missing("handleType"))?,
                handle: raw.handle.ok_or_else(|| missing("handle"))?,
            }),
            SummaryType::Attachment => Ok(SummaryObject::Attachment {
                id: raw.id.ok_or_else(|| missing("id"))?,
            }),
        }
    }
}

impl From<SummaryObject> for RawSummaryObject {
    fn from(value: SummaryObject) -> Self {
        let mut raw = RawSummaryObject {
            summary_type: value.summary_type(),
            content: None,
            tree: None,
            unreferenced: None,
            handle_type: None,
            handle: None,
            id: None,
        };
        match value {
            SummaryObject::Tree(tree) => {
                raw.tree = Some(tree.tree);
                raw.unreferenced = tree.unreferenced;
            }
            SummaryObject::Blob { content } => raw.content = Some(content),
            SummaryObject::Handle {
                handle_type,
                handle,
            } => {
                raw.handle_type = Some(handle_type);
                raw.handle = Some(handle);
            }
            SummaryObject::Attachment { id } => raw.id = Some(id),
        }
        raw
    }
}
