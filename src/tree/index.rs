//! Reverse lookup from blob content id to the path it was found at

use crate::types::ContentId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// Map from blob content id to an absolute-style path (`/dir/file`)
///
/// Owned by the caller and handed to each build by `&mut`, so one index can be
/// shared across several builds. When two paths carry the same id the one
/// recorded last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReverseIndex {
    paths: HashMap<ContentId, String>,
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` for `id`, returning the path it replaces
    pub fn record(&mut self, id: ContentId, path: String) -> Option<String> {
        let previous = self.paths.insert(id, path);
        if let Some(previous) = &previous {
            trace!(previous = %previous, "Reverse index entry replaced");
        }
        previous
    }

    pub fn path_of(&self, id: &ContentId) -> Option<&str> {
        self.paths.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &ContentId) -> bool {
        self.paths.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContentId, &str)> {
        self.paths.iter().map(|(id, path)| (id, path.as_str()))
    }
}
