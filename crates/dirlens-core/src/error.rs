//! Error types for scanning and catalog operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the scanner and the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Path does not exist or is not the expected kind of entry.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Entry is listed but cannot be read.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Catalog data is not a valid encoding of a directory tree.
    #[error("Malformed catalog data: {message}")]
    Malformed { message: String },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl CatalogError {
    /// Create an error from an I/O failure while reading the tree.
    ///
    /// Missing paths and permission failures get their own variants.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a malformed-data error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Symbolic link target does not exist.
    BrokenSymlink,
    /// Error listing a directory.
    ReadError,
    /// Error reading metadata.
    MetadataError,
    /// Entry name is not valid UTF-8.
    InvalidName,
}

/// Entry left out of the tree under [`ErrorPolicy::Skip`](crate::ErrorPolicy::Skip).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning from the error that would have aborted a fail-fast scan.
    pub fn from_error(error: &CatalogError, kind: WarningKind) -> Self {
        let path = match error {
            CatalogError::NotFound { path }
            | CatalogError::PermissionDenied { path }
            | CatalogError::Io { path, .. } => path.clone(),
            _ => PathBuf::new(),
        };
        let kind = match error {
            CatalogError::PermissionDenied { .. } => WarningKind::PermissionDenied,
            _ => kind,
        };
        Self {
            message: error.to_string(),
            path,
            kind,
        }
    }

    /// Create a broken symlink warning.
    pub fn broken_symlink(path: impl Into<PathBuf>, target: &str) -> Self {
        let path = path.into();
        Self {
            message: format!("Broken symlink: {} -> {target}", path.display()),
            path,
            kind: WarningKind::BrokenSymlink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_io() {
        let err = CatalogError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, CatalogError::PermissionDenied { .. }));

        let err = CatalogError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_warning_from_permission_error() {
        let err = CatalogError::PermissionDenied {
            path: PathBuf::from("/locked"),
        };
        let warning = ScanWarning::from_error(&err, WarningKind::ReadError);
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert_eq!(warning.path, PathBuf::from("/locked"));
        assert!(warning.message.contains("Permission denied"));
    }
}
