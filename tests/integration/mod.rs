//! Integration tests for snapshot tree construction and storage entries

mod config_integration;
mod test_utils;
mod tree_entries;
