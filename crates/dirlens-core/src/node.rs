//! File and directory node types.
//!
//! The serde field names are the persisted catalog format and must not change.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Return the extension of a file name, including the leading dot.
///
/// The extension runs from the last `.` to the end of the name. A name with
/// no dot, or whose last dot is its final character, has no extension.
/// Case is preserved.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}

/// A single regular file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileEntry {
    /// Base file name, including the extension.
    #[serde(rename = "FileName")]
    pub name: CompactString,

    /// Extension including the leading dot, or empty.
    #[serde(rename = "Extension")]
    pub extension: CompactString,
}

impl FileEntry {
    /// Create a file entry, deriving the extension from the name.
    pub fn new(name: impl Into<CompactString>) -> Self {
        let name = name.into();
        let extension = CompactString::new(extension_of(&name));
        Self { name, extension }
    }

    /// Check whether the file has an extension.
    pub fn has_extension(&self) -> bool {
        !self.extension.is_empty()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.name.is_empty() {
            return Err(CatalogError::malformed("file entry with an empty FileName"));
        }
        if self.has_extension() && !self.extension.starts_with('.') {
            return Err(CatalogError::malformed(format!(
                "extension {:?} of {:?} does not start with '.'",
                self.extension, self.name
            )));
        }
        Ok(())
    }
}

/// A directory and everything beneath it.
///
/// Children are owned exclusively by their parent, so a `DirectoryNode` is
/// always a strict tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    /// Directory name (not full path).
    #[serde(rename = "DirectoryName")]
    pub name: CompactString,

    /// Files directly inside this directory, in enumeration order.
    #[serde(rename = "Files")]
    pub files: Vec<FileEntry>,

    /// Subdirectories, in enumeration order.
    #[serde(rename = "NestedDirectories")]
    pub children: Vec<DirectoryNode>,
}

impl DirectoryNode {
    /// Create an empty directory node.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a file by name.
    pub fn with_file(mut self, name: impl Into<CompactString>) -> Self {
        self.files.push(FileEntry::new(name));
        self
    }

    /// Append a subdirectory.
    pub fn with_child(mut self, child: DirectoryNode) -> Self {
        self.children.push(child);
        self
    }

    /// Check if this directory has neither files nor subdirectories.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.children.is_empty()
    }

    /// Count every file in this subtree.
    pub fn total_files(&self) -> u64 {
        self.files.len() as u64 + self.children.iter().map(Self::total_files).sum::<u64>()
    }

    /// Count every directory below this one (excluding itself).
    pub fn total_dirs(&self) -> u64 {
        self.children
            .iter()
            .map(|child| 1 + child.total_dirs())
            .sum()
    }

    /// Height of the subtree: 0 for a directory without subdirectories.
    pub fn depth(&self) -> u32 {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Find a direct subdirectory by name.
    pub fn child(&self, name: &str) -> Option<&DirectoryNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Check the file entry invariants over the whole subtree.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for file in &self.files {
            file.validate()?;
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }
}
