//! Extension statistics for dirlens trees.
//!
//! Two pure reductions over a [`DirectoryNode`]:
//!
//! - [`unique_extensions`] - the set of extensions present anywhere in the tree
//! - [`extension_counts`] - how many files carry each extension
//!
//! Neither mutates the tree, so both are safe to call repeatedly and from
//! several readers at once. The counts always sum to
//! [`DirectoryNode::total_files`] and their keys are exactly the unique set.
//!
//! ```rust
//! use dirlens_analyze::{ExtensionAnalyzer, extension_counts, unique_extensions};
//! use dirlens_core::DirectoryNode;
//!
//! let root = DirectoryNode::new("root")
//!     .with_file("file1.txt")
//!     .with_file("file2.txt")
//!     .with_file("file3.cs");
//!
//! assert_eq!(unique_extensions(&root).len(), 2);
//! assert_eq!(extension_counts(&root)[".txt"], 2);
//!
//! let report = ExtensionAnalyzer::new().analyze(&root);
//! for row in &report.extensions {
//!     println!("{}: {} file(s)", row.extension, row.count);
//! }
//! ```

mod extensions;

pub use extensions::{
    ExtensionAnalyzer, ExtensionConfig, ExtensionConfigBuilder, ExtensionCount, ExtensionCounts,
    ExtensionReport, extension_counts, unique_extensions,
};

// Re-export core types
pub use dirlens_core::{DirectoryNode, FileEntry};
