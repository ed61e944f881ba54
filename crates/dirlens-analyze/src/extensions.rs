//! Extension statistics.
//!
//! Both reductions recurse over the tree: a node's result is its own files
//! combined with the result of each child. Union and addition are associative
//! and commutative, so the evaluation order of subtrees does not matter.

use compact_str::CompactString;
use derive_builder::Builder;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use dirlens_core::DirectoryNode;

/// Extension to file count, in first-seen order.
pub type ExtensionCounts = IndexMap<CompactString, u64>;

/// Collect every distinct extension in the subtree, including `""` for
/// files without one.
pub fn unique_extensions(root: &DirectoryNode) -> IndexSet<CompactString> {
    let mut extensions: IndexSet<CompactString> =
        root.files.iter().map(|f| f.extension.clone()).collect();

    for child in &root.children {
        extensions.extend(unique_extensions(child));
    }

    extensions
}

/// Count files per extension across the whole subtree.
pub fn extension_counts(root: &DirectoryNode) -> ExtensionCounts {
    let mut counts = ExtensionCounts::new();

    for file in &root.files {
        *counts.entry(file.extension.clone()).or_insert(0) += 1;
    }

    for child in &root.children {
        for (extension, count) in extension_counts(child) {
            *counts.entry(extension).or_insert(0) += count;
        }
    }

    counts
}

/// Configuration for the extension report.
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into))]
pub struct ExtensionConfig {
    /// Treat `.TXT` and `.txt` as the same extension.
    #[builder(default = "false")]
    pub fold_case: bool,

    /// Maximum number of rows to keep (None = all).
    #[builder(default)]
    pub max_rows: Option<usize>,
}

impl ExtensionConfig {
    /// Create a new config builder.
    pub fn builder() -> ExtensionConfigBuilder {
        ExtensionConfigBuilder::default()
    }
}

/// Number of files sharing one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionCount {
    /// Extension including the leading dot, or empty.
    pub extension: CompactString,
    /// Number of files.
    pub count: u64,
}

/// Extension statistics for a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionReport {
    /// Name of the root directory.
    pub root: CompactString,
    /// Number of distinct extensions.
    pub unique_count: usize,
    /// Total files analyzed.
    pub total_files: u64,
    /// Rows sorted by count descending, then extension.
    pub extensions: Vec<ExtensionCount>,
}

impl ExtensionReport {
    /// Look up the count for an extension.
    pub fn count_of(&self, extension: &str) -> Option<u64> {
        self.extensions
            .iter()
            .find(|row| row.extension == extension)
            .map(|row| row.count)
    }

    /// Get the most common extension.
    pub fn most_common(&self) -> Option<&ExtensionCount> {
        self.extensions.first()
    }
}

/// Builds [`ExtensionReport`]s.
pub struct ExtensionAnalyzer {
    config: ExtensionConfig,
}

impl ExtensionAnalyzer {
    /// Create a new analyzer with default config.
    pub fn new() -> Self {
        Self {
            config: ExtensionConfig::default(),
        }
    }

    /// Create a new analyzer with custom config.
    pub fn with_config(config: ExtensionConfig) -> Self {
        Self { config }
    }

    /// Analyze the extensions in a tree.
    pub fn analyze(&self, root: &DirectoryNode) -> ExtensionReport {
        let counts = extension_counts(root);
        let total_files = counts.values().sum();

        let counts = if self.config.fold_case {
            let mut folded = ExtensionCounts::new();
            for (extension, count) in counts {
                *folded.entry(extension.to_lowercase().into()).or_insert(0) += count;
            }
            folded
        } else {
            counts
        };

        let unique_count = counts.len();
        let mut extensions: Vec<ExtensionCount> = counts
            .into_iter()
            .map(|(extension, count)| ExtensionCount { extension, count })
            .collect();
        extensions.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.extension.cmp(&b.extension)));

        if let Some(max_rows) = self.config.max_rows {
            extensions.truncate(max_rows);
        }

        ExtensionReport {
            root: root.name.clone(),
            unique_count,
            total_files,
            extensions,
        }
    }
}

impl Default for ExtensionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
