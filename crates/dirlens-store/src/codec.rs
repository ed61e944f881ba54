//! Encoding trees to and from catalog JSON.

use serde::Deserialize;

use dirlens_core::{CatalogError, DirectoryNode};

/// Encode a tree as indented catalog JSON.
///
/// Files and subdirectories are written in the order they are stored.
pub fn encode(root: &DirectoryNode) -> Result<Vec<u8>, CatalogError> {
    serde_json::to_vec_pretty(root)
        .map_err(|e| CatalogError::malformed(format!("cannot encode {:?}: {e}", root.name)))
}

/// Decode catalog JSON into a tree.
///
/// Fails with [`CatalogError::Malformed`] on invalid JSON, trailing content,
/// missing or mistyped fields, and file entries that break the extension
/// invariant. Missing sequences are never defaulted to empty.
pub fn decode(bytes: &[u8]) -> Result<DirectoryNode, CatalogError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    // Catalogs nest two JSON levels per directory
    de.disable_recursion_limit();

    let root = DirectoryNode::deserialize(&mut de).map_err(malformed)?;
    de.end().map_err(malformed)?;

    root.validate()?;
    Ok(root)
}

fn malformed(err: serde_json::Error) -> CatalogError {
    CatalogError::malformed(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let root = DirectoryNode::new("root").with_file("a.txt");
        let json = String::from_utf8(encode(&root).unwrap()).unwrap();

        let name = json.find("\"DirectoryName\"").unwrap();
        let files = json.find("\"Files\"").unwrap();
        let nested = json.find("\"NestedDirectories\"").unwrap();
        assert!(name < files && files < nested);
        assert!(json.contains("\"FileName\": \"a.txt\""));
        assert!(json.contains("\"Extension\": \".txt\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_decode_missing_sequences() {
        let err = decode(br#"{"DirectoryName": "x"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[test]
    fn test_decode_trailing_content() {
        let err = decode(br#"{"DirectoryName": "x", "Files": [], "NestedDirectories": []} {}"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[test]
    fn test_decode_compact_input() {
        let root = decode(br#"{"NestedDirectories":[],"Files":[{"Extension":"","FileName":"x"}],"DirectoryName":"r"}"#)
            .unwrap();
        assert_eq!(root, DirectoryNode::new("r").with_file("x"));
    }
}
