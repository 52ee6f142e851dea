//! Error types for snapshot tree construction and storage entries.

use thiserror::Error;

/// Errors raised while rebuilding a hierarchy from a flat listing
#[derive(Debug, Error)]
pub enum TreeError {
    /// The listing was not breadth-first: a child arrived before its directory
    #[error("Ordering violation: parent directory {parent:?} of {path:?} has not been seen")]
    OrderingViolation { path: String, parent: String },

    #[error("Invalid percent-encoding in path segment {segment:?}")]
    InvalidSegmentEncoding { segment: String },

    #[error("Unknown entry kind: {0}")]
    UnknownEntryKind(String),
}

/// Errors raised while classifying summary objects
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A type tag outside the known set, including a handle pointing at a handle
    #[error("Unrecognized summary variant: {0}")]
    UnrecognizedVariant(String),
}

/// Errors raised by storage tree entries
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("Entry {path:?} of type {entry_type} cannot have mode {mode}")]
    ModeMismatch {
        path: String,
        entry_type: String,
        mode: String,
    },

    #[error("Unknown file mode: {0}")]
    UnknownMode(String),

    #[error("Unknown tree entry type: {0}")]
    UnknownEntryType(String),

    #[error("Invalid {entry_type} entry value: {source}")]
    InvalidValue {
        entry_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode blob contents: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Top-level error for callers that drive the whole crate
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),

    #[error("Entry error: {0}")]
    Entry(#[from] EntryError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
