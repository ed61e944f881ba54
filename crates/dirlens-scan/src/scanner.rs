//! JWalk-based directory tree builder.

use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;

use compact_str::CompactString;
use jwalk::{Parallelism, WalkDir};
use tracing::{debug, trace, warn};

use dirlens_core::{
    CatalogError, DirectoryNode, ErrorPolicy, FileEntry, ScanConfig, ScanWarning, ScannedTree,
    TreeStats, WarningKind,
};

/// Build the tree for `path` with the default configuration.
///
/// Fails with [`CatalogError::NotFound`] if `path` is not an existing
/// directory, and with the first read error encountered below it.
pub fn build(path: impl AsRef<Path>) -> Result<DirectoryNode, CatalogError> {
    TreeBuilder::new()
        .scan(&ScanConfig::new(path.as_ref()))
        .map(ScannedTree::into_root)
}

/// Builds [`DirectoryNode`] trees from disk using a serial jwalk traversal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeBuilder;

impl TreeBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Scan the directory named by `config.root`.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScannedTree, CatalogError> {
        let start = Instant::now();
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| CatalogError::io(&config.root, e))?;

        // Verify root is a directory
        if !root_path.is_dir() {
            return Err(CatalogError::NotFound {
                path: config.root.clone(),
            });
        }

        debug!(root = %root_path.display(), "scanning directory tree");

        let mut walk = WalkState::new(config.on_error);
        self.collect_entries(config, &root_path, &mut walk)?;

        let root = walk.build_root(&root_path)?;
        let scan_duration = start.elapsed();

        debug!(
            files = walk.stats.total_files,
            dirs = walk.stats.total_dirs,
            warnings = walk.warnings.len(),
            elapsed_ms = scan_duration.as_millis() as u64,
            "scan finished"
        );

        Ok(ScannedTree::new(
            root,
            root_path,
            config.clone(),
            walk.stats,
            scan_duration,
            walk.warnings,
        ))
    }

    /// Walk the tree and group every entry under its parent directory.
    fn collect_entries(
        &self,
        config: &ScanConfig,
        root_path: &Path,
        walk: &mut WalkState,
    ) -> Result<(), CatalogError> {
        let walker = WalkDir::new(root_path)
            .parallelism(Parallelism::Serial)
            .skip_hidden(!config.include_hidden)
            .follow_links(config.follow_symlinks)
            .min_depth(0);

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    // Followed links with a missing target fail to resolve
                    if let Some(path) = err.path().filter(|p| p.is_symlink()) {
                        let path = path.to_path_buf();
                        let depth = depth_below(root_path, &path);
                        if let Some(name) = path.file_name().map(|n| n.to_os_string()) {
                            if let Some(name) = walk.entry_name(&path, &name)? {
                                walk.push_symlink(path, name, depth);
                            }
                        }
                        continue;
                    }
                    walk.absorb(walk_error(&err), WarningKind::ReadError)?;
                    continue;
                }
            };

            let depth = entry.depth() as u32;
            if depth == 0 {
                continue;
            }

            let path = entry.path();
            let Some(file_name) = walk.entry_name(&path, &entry.file_name())? else {
                continue;
            };
            let file_type = entry.file_type();

            if file_type.is_symlink() {
                walk.push_symlink(path, file_name, depth);
                continue;
            }

            if let Err(err) = entry.metadata() {
                walk.absorb(walk_error(&err), WarningKind::MetadataError)?;
                continue;
            }

            if file_type.is_dir() {
                trace!(path = %path.display(), "directory");
                walk.stats.record_dir(depth);
                walk.push(path, file_name, true);
            } else {
                walk.stats.record_file(depth);
                walk.push(path, file_name, false);
            }
        }

        Ok(())
    }
}

/// Mutable state of one traversal.
struct WalkState {
    policy: ErrorPolicy,
    stats: TreeStats,
    warnings: Vec<ScanWarning>,
    /// Map from parent path to children, in listing order.
    entries_by_parent: HashMap<PathBuf, Vec<EntryInfo>>,
    /// Paths left out of the tree under the skip policy.
    skipped: HashSet<PathBuf>,
}

impl WalkState {
    fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            stats: TreeStats::new(),
            warnings: Vec::new(),
            entries_by_parent: HashMap::new(),
            skipped: HashSet::new(),
        }
    }

    fn push(&mut self, path: PathBuf, name: String, is_dir: bool) {
        if let Some(parent) = path.parent() {
            self.entries_by_parent
                .entry(parent.to_path_buf())
                .or_default()
                .push(EntryInfo {
                    name: name.into(),
                    path,
                    is_dir,
                });
        }
    }

    /// Record a symbolic link that is not descended into.
    ///
    /// Links to directories become empty subdirectories, everything else a
    /// file. A link whose target is missing is kept as a file with a warning.
    fn push_symlink(&mut self, path: PathBuf, name: String, depth: u32) {
        self.stats.record_symlink();
        match std::fs::metadata(&path) {
            Ok(target) if target.is_dir() => {
                self.stats.record_dir(depth);
                self.push(path, name, true);
            }
            Ok(_) => {
                self.stats.record_file(depth);
                self.push(path, name, false);
            }
            Err(_) => {
                let target = std::fs::read_link(&path)
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_default();
                warn!(path = %path.display(), %target, "broken symlink");
                self.warnings.push(ScanWarning::broken_symlink(&path, &target));
                self.stats.record_file(depth);
                self.push(path, name, false);
            }
        }
    }

    /// Get an entry name as UTF-8.
    ///
    /// Names that are not valid UTF-8 cannot be stored without changing them,
    /// so they go through the error policy. `Ok(None)` means the entry was
    /// skipped.
    fn entry_name(&mut self, path: &Path, name: &OsStr) -> Result<Option<String>, CatalogError> {
        match name.to_str() {
            Some(name) => Ok(Some(name.to_string())),
            None => {
                let error = CatalogError::Io {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        "file name is not valid UTF-8",
                    ),
                };
                self.absorb(error, WarningKind::InvalidName)?;
                Ok(None)
            }
        }
    }

    /// Apply the error policy: propagate, or record a warning and carry on.
    fn absorb(&mut self, error: CatalogError, kind: WarningKind) -> Result<(), CatalogError> {
        match self.policy {
            ErrorPolicy::FailFast => Err(error),
            ErrorPolicy::Skip => {
                let warning = ScanWarning::from_error(&error, kind);
                warn!(path = %warning.path.display(), "skipping unreadable entry: {error}");
                self.skipped.insert(warning.path.clone());
                self.warnings.push(warning);
                Ok(())
            }
        }
    }

    /// Build the root node. Under the skip policy a root name that is not
    /// UTF-8 is kept in lossy form, with a warning.
    fn build_root(&mut self, root_path: &Path) -> Result<DirectoryNode, CatalogError> {
        let name = match root_path.file_name() {
            Some(name) => match self.entry_name(root_path, name)? {
                Some(name) => name,
                None => name.to_string_lossy().to_string(),
            },
            None => root_path.to_string_lossy().to_string(),
        };
        Ok(self.build_node(root_path, name.into()))
    }

    /// Recursively build a node and its children.
    fn build_node(&mut self, path: &Path, name: CompactString) -> DirectoryNode {
        let mut node = DirectoryNode::new(name);

        let children_entries = self.entries_by_parent.remove(path).unwrap_or_default();
        for entry in children_entries {
            if self.skipped.contains(&entry.path) {
                continue;
            }
            if entry.is_dir {
                let child = self.build_node(&entry.path, entry.name);
                node.children.push(child);
            } else {
                node.files.push(FileEntry::new(entry.name));
            }
        }

        node
    }
}

/// Temporary struct for collecting entry information.
struct EntryInfo {
    name: CompactString,
    path: PathBuf,
    is_dir: bool,
}

/// Convert a jwalk error into a catalog error, keeping the I/O kind.
fn walk_error(err: &jwalk::Error) -> CatalogError {
    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
    match err.io_error() {
        Some(io) => CatalogError::io(path, std::io::Error::new(io.kind(), io.to_string())),
        None => CatalogError::Io {
            path,
            source: std::io::Error::other(err.to_string()),
        },
    }
}

/// Depth of `path` below the scan root.
fn depth_below(root_path: &Path, path: &Path) -> u32 {
    path.strip_prefix(root_path)
        .map(|rel| rel.components().count() as u32)
        .unwrap_or(1)
}
