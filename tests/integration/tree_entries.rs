//! Integration tests for storage tree entries

use snaptree::entry::UTF8;
use snaptree::{add_blob_to_tree, FileMode, Tree, TreeEntry, TreeEntryType};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct Attributes {
    pkg: String,
    snapshot_format_version: String,
}

/// Test assembling a nested tree the way a summary writer does
#[test]
fn test_assemble_nested_tree() {
    let mut protocol = Tree::new();
    add_blob_to_tree(
        &mut protocol,
        "attributes",
        &Attributes {
            pkg: "@scope/pkg".to_string(),
            snapshot_format_version: "0.1".to_string(),
        },
    )
    .unwrap();
    add_blob_to_tree(&mut protocol, "quorumMembers", &json!([["client-1", {"seq": 1}]])).unwrap();

    let root = Tree::with_entries(vec![
        TreeEntry::tree(".protocol", protocol),
        TreeEntry::attachment("big-blob", "ext-123"),
    ]);

    assert_eq!(root.entries[0].entry_type(), TreeEntryType::Tree);
    assert_eq!(root.entries[0].mode(), FileMode::Directory);
    assert_eq!(root.entries[1].mode(), FileMode::File);

    let TreeEntry::Tree { value: protocol, .. } = &root.entries[0] else {
        panic!("expected a tree entry");
    };
    assert_eq!(protocol.entries.len(), 2);
    assert_eq!(
        protocol.entries[0],
        TreeEntry::blob_with_encoding(
            "attributes",
            r#"{"pkg":"@scope/pkg","snapshot_format_version":"0.1"}"#,
            UTF8
        )
    );
    assert_eq!(
        protocol.entries[1],
        TreeEntry::blob("quorumMembers", r#"[["client-1",{"seq":1}]]"#)
    );
}

/// Test that the append helper keeps order and duplicates
#[test]
fn test_append_keeps_order_and_duplicates() {
    let mut tree = Tree::new();
    add_blob_to_tree(&mut tree, "a", &1).unwrap();
    add_blob_to_tree(&mut tree, "b", &"two").unwrap();
    add_blob_to_tree(&mut tree, "a", &3).unwrap();

    let paths: Vec<&str> = tree.entries.iter().map(TreeEntry::path).collect();
    assert_eq!(paths, vec!["a", "b", "a"]);
    assert_eq!(tree.entries[1], TreeEntry::blob("b", "\"two\""));
}

/// Test the serialized record shape consumed by a tree writer
#[test]
fn test_tree_record_json() {
    let mut tree = Tree::with_entries(vec![TreeEntry::tree(
        "sub",
        Tree::with_entries(vec![TreeEntry::blob("leaf", "v")]),
    )]);
    tree.unreferenced = Some(true);

    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["unreferenced"], true);
    assert_eq!(json["entries"][0]["mode"], "040000");
    assert_eq!(json["entries"][0]["type"], "Tree");
    assert_eq!(json["entries"][0]["value"]["entries"][0]["type"], "Blob");
    assert_eq!(
        json["entries"][0]["value"]["entries"][0]["value"]["encoding"],
        "utf-8"
    );
    assert!(json.get("id").is_none());

    let parsed: Tree = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, tree);
}

/// Test that malformed records are rejected
#[test]
fn test_rejects_malformed_records() {
    let bad_mode = json!({"mode": "120000", "path": "l", "type": "Blob",
                          "value": {"contents": "x", "encoding": "utf-8"}});
    assert!(serde_json::from_value::<TreeEntry>(bad_mode).is_err());

    let bad_value = json!({"mode": "100644", "path": "a", "type": "Attachment",
                           "value": {"contents": "x"}});
    let err = serde_json::from_value::<TreeEntry>(bad_value).unwrap_err();
    assert!(err.to_string().contains("Invalid Attachment entry value"));

    let bad_type = json!({"mode": "100644", "path": "a", "type": "Commit", "value": {}});
    assert!(serde_json::from_value::<TreeEntry>(bad_type).is_err());
}
