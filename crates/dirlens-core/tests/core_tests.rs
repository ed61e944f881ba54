use dirlens_core::{
    CatalogError, DirectoryNode, ErrorPolicy, FileEntry, ScanConfig, ScanWarning, ScannedTree,
    TreeStats, WarningKind,
};
use std::path::PathBuf;
use std::time::Duration;

fn sample_tree() -> DirectoryNode {
    DirectoryNode::new("ExampleFolder")
        .with_file("FirstLevelFile1.txt")
        .with_file("FirstLevelFile2.test")
        .with_file("myfolder.json")
        .with_child(
            DirectoryNode::new("FirstLevelFolder1")
                .with_file("SecondLevelFile1.cs")
                .with_file("SecondLevelFile2.txt")
                .with_child(DirectoryNode::new("SecondLevelFolder1").with_file("ThirdLevelFile1.txt")),
        )
}

#[test]
fn test_file_entry_extensions() {
    let cases = [
        ("file1.txt", ".txt"),
        ("fileWithoutExtension", ""),
        ("Makefile", ""),
        ("photo.JPEG", ".JPEG"),
        ("backup.tar.gz", ".gz"),
        (".env", ".env"),
    ];

    for (name, expected) in cases {
        let entry = FileEntry::new(name);
        assert_eq!(entry.name, name);
        assert_eq!(entry.extension, expected, "extension of {name}");
        assert!(entry.extension.is_empty() || entry.extension.starts_with('.'));
    }
}

#[test]
fn test_structural_equality() {
    let a = sample_tree();
    let b = sample_tree();
    assert_eq!(a, b);

    // Same contents, different file order
    let mut reordered = sample_tree();
    reordered.files.swap(0, 1);
    assert_ne!(a, reordered);

    // Same contents, renamed nested directory
    let mut renamed = sample_tree();
    renamed.children[0].children[0].name = "Other".into();
    assert_ne!(a, renamed);
}

#[test]
fn test_directory_node_queries() {
    let tree = sample_tree();

    assert_eq!(tree.total_files(), 6);
    assert_eq!(tree.total_dirs(), 2);
    assert_eq!(tree.depth(), 2);
    assert!(!tree.is_empty());

    let nested = tree.child("FirstLevelFolder1").unwrap();
    assert_eq!(nested.files.len(), 2);
    assert!(tree.child("missing").is_none());

    let empty = DirectoryNode::new("empty");
    assert!(empty.is_empty());
    assert_eq!(empty.total_files(), 0);
    assert_eq!(empty.depth(), 0);
}

#[test]
fn test_serde_field_names() {
    let tree = DirectoryNode::new("root").with_file("a.txt");
    let value = serde_json::to_value(&tree).unwrap();

    assert_eq!(value["DirectoryName"], "root");
    assert_eq!(value["Files"][0]["FileName"], "a.txt");
    assert_eq!(value["Files"][0]["Extension"], ".txt");
    assert!(value["NestedDirectories"].as_array().unwrap().is_empty());
}

#[test]
fn test_serde_requires_all_fields() {
    let result = serde_json::from_str::<DirectoryNode>(r#"{"DirectoryName": "x"}"#);
    assert!(result.is_err());

    let result = serde_json::from_str::<DirectoryNode>(
        r#"{"DirectoryName": "x", "Files": [{"FileName": "a"}], "NestedDirectories": []}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_serde_ignores_unknown_fields() {
    let node: DirectoryNode = serde_json::from_str(
        r#"{"DirectoryName": "x", "Files": [], "NestedDirectories": [], "Comment": "extra"}"#,
    )
    .unwrap();
    assert_eq!(node, DirectoryNode::new("x"));
}

#[test]
fn test_validate() {
    assert!(sample_tree().validate().is_ok());

    let mut tree = sample_tree();
    tree.children[0].files[0].name = "".into();
    assert!(matches!(tree.validate(), Err(CatalogError::Malformed { .. })));
}

#[test]
fn test_scan_config_defaults() {
    let config = ScanConfig::default();
    assert_eq!(config.root, PathBuf::from("."));
    assert!(config.include_hidden);
    assert_eq!(config.on_error, ErrorPolicy::FailFast);

    // Missing optional fields fall back to defaults
    let config: ScanConfig = serde_json::from_str(r#"{"root": "/data"}"#).unwrap();
    assert!(config.include_hidden);
    assert!(!config.follow_symlinks);
    assert_eq!(config.on_error, ErrorPolicy::FailFast);
}

#[test]
fn test_scanned_tree() {
    let mut stats = TreeStats::new();
    stats.record_file(0);

    let warning = ScanWarning::new("/data/locked", "Permission denied", WarningKind::PermissionDenied);
    let tree = ScannedTree::new(
        DirectoryNode::new("data").with_file("a.txt"),
        PathBuf::from("/data"),
        ScanConfig::new("/data"),
        stats,
        Duration::from_millis(3),
        vec![warning],
    );

    assert_eq!(tree.total_files(), 1);
    assert!(tree.has_warnings());
    assert_eq!(tree.into_root().name, "data");
}

#[test]
fn test_error_display() {
    let err = CatalogError::NotFound {
        path: PathBuf::from("/nope"),
    };
    assert_eq!(err.to_string(), "Path not found: /nope");

    let err = CatalogError::malformed("missing field `Files`");
    assert!(err.to_string().contains("missing field"));
}
