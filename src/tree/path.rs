//! Path splitting and segment encoding for flat listings
//!
//! Listing paths are `/`-separated strings relative to the root tree. Segment
//! names may be percent-encoded the way `encodeURIComponent` encodes them.

use crate::error::TreeError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Prefix older writers placed in front of every application path
pub const LEGACY_APP_PREFIX: &str = ".app/";

/// Characters escaped in a segment name (everything `encodeURIComponent` escapes)
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Remove a single leading `.app/` from a path if present
///
/// Only an exact prefix is removed, and only once.
pub fn strip_legacy_prefix(path: &str) -> &str {
    path.strip_prefix(LEGACY_APP_PREFIX).unwrap_or(path)
}

/// Split a path at its last `/` into (parent directory, leaf name)
///
/// A path without a separator lives directly under the root, whose path is `""`.
pub fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(index) => (&path[..index], &path[index + 1..]),
        None => ("", path),
    }
}

/// Percent-decode a single segment name
///
/// Every `%` must introduce two hex digits and the decoded bytes must be UTF-8.
pub fn decode_segment(segment: &str) -> Result<Cow<'_, str>, TreeError> {
    let invalid = || TreeError::InvalidSegmentEncoding {
        segment: segment.to_string(),
    };

    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return Err(invalid());
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(segment).decode_utf8().map_err(|_| invalid())
}

/// Percent-encode a segment name so it survives as a single path segment
pub fn encode_segment(name: &str) -> Cow<'_, str> {
    utf8_percent_encode(name, SEGMENT).into()
}

/// Join a parent path and a child segment
pub fn join(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", parent, segment)
    }
}
