//! Scanned tree container and statistics.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ScanConfig;
use crate::error::ScanWarning;
use crate::node::DirectoryNode;

/// Summary statistics gathered while scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of files.
    pub total_files: u64,
    /// Total number of directories below the root.
    pub total_dirs: u64,
    /// Symbolic links encountered, also counted as files or directories.
    pub total_symlinks: u64,
    /// Maximum depth reached.
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file entry.
    pub fn record_file(&mut self, depth: u32) {
        self.total_files += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a symlink. The caller records it as a file or directory too.
    pub fn record_symlink(&mut self) {
        self.total_symlinks += 1;
    }

    /// Record a directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// A directory tree built from disk, with scan metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedTree {
    /// Root node of the tree.
    pub root: DirectoryNode,

    /// Canonical root path that was scanned.
    pub root_path: PathBuf,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Scan configuration used.
    pub config: ScanConfig,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Entries skipped under the skip policy.
    pub warnings: Vec<ScanWarning>,
}

impl ScannedTree {
    /// Create a new scanned tree.
    pub fn new(
        root: DirectoryNode,
        root_path: PathBuf,
        config: ScanConfig,
        stats: TreeStats,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            root,
            root_path,
            scan_duration,
            config,
            stats,
            warnings,
        }
    }

    /// Get the total number of files.
    pub fn total_files(&self) -> u64 {
        self.stats.total_files
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Take the root node, dropping the scan metadata.
    pub fn into_root(self) -> DirectoryNode {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_stats_default() {
        let stats = TreeStats::default();
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_dirs, 0);
        assert_eq!(stats.max_depth, 0);
    }

    #[test]
    fn test_tree_stats_record() {
        let mut stats = TreeStats::new();
        stats.record_file(2);
        stats.record_symlink();
        stats.record_file(1);
        stats.record_dir(3);

        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_symlinks, 1);
        assert_eq!(stats.total_dirs, 1);
        assert_eq!(stats.max_depth, 3);
    }
}
