//! Directory traversal for dirlens.
//!
//! This crate walks a directory on disk and materializes it as a
//! [`DirectoryNode`] tree. The walk runs serially on the caller's thread and
//! only reads from the filesystem.
//!
//! # Overview
//!
//! - Files and subdirectories keep the order the directory listing returns;
//!   nothing is sorted, so the order can differ between platforms.
//! - Unreadable entries abort the scan by default. With
//!   [`ErrorPolicy::Skip`] they are left out and recorded as warnings.
//! - Symbolic links are recorded as files unless links are followed.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirlens_scan::{ErrorPolicy, ScanConfig, TreeBuilder};
//!
//! let root = dirlens_scan::build("/path/to/scan").unwrap();
//! println!("{} files", root.total_files());
//!
//! let config = ScanConfig::builder()
//!     .root("/path/to/scan")
//!     .on_error(ErrorPolicy::Skip)
//!     .build()
//!     .unwrap();
//! let tree = TreeBuilder::new().scan(&config).unwrap();
//! for warning in &tree.warnings {
//!     eprintln!("skipped {}: {}", warning.path.display(), warning.message);
//! }
//! ```

mod scanner;

pub use scanner::{TreeBuilder, build};

// Re-export core types for convenience
pub use dirlens_core::{
    CatalogError, DirectoryNode, ErrorPolicy, FileEntry, ScanConfig, ScanWarning, ScannedTree,
    TreeStats, WarningKind,
};
