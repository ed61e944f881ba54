//! JSON catalog encoding and persistence for dirlens.
//!
//! A catalog is the JSON encoding of a [`DirectoryNode`]:
//!
//! ```text
//! DirectoryNode := { "DirectoryName": String, "Files": [FileInfo], "NestedDirectories": [DirectoryNode] }
//! FileInfo      := { "FileName": String, "Extension": String }
//! ```
//!
//! Every field is required and unknown fields are ignored. For any tree `d`,
//! `decode(&encode(&d)?)? == d`.
//!
//! ```rust,no_run
//! use dirlens_store::{load, save};
//!
//! let root = dirlens_scan::build("/path/to/scan").unwrap();
//! save(&root, "/tmp/catalogs/scan.json").unwrap();
//! assert_eq!(load("/tmp/catalogs/scan.json").unwrap(), root);
//! ```

mod codec;
mod file;

pub use codec::{decode, encode};
pub use file::{load, save};

pub use dirlens_core::{CatalogError, DirectoryNode, FileEntry};
