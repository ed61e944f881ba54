//! Core types for dirlens.
//!
//! This crate provides the directory tree model shared by the scanner, the
//! extension analyzer and the catalog store, together with the error type and
//! scan configuration used throughout the workspace.

mod config;
mod error;
mod node;
mod tree;

pub use config::{ErrorPolicy, ScanConfig, ScanConfigBuilder};
pub use error::{CatalogError, ScanWarning, WarningKind};
pub use node::{DirectoryNode, FileEntry, extension_of};
pub use tree::{ScannedTree, TreeStats};
