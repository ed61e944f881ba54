//! Saving and loading catalog files.

use std::fs;
use std::path::Path;

use tracing::debug;

use dirlens_core::{CatalogError, DirectoryNode};

use crate::codec::{decode, encode};

/// Write the catalog for `root` to `destination`.
///
/// Missing parent directories are created first. Every failure is reported
/// as [`CatalogError::Io`].
pub fn save(root: &DirectoryNode, destination: impl AsRef<Path>) -> Result<(), CatalogError> {
    let destination = destination.as_ref();
    let bytes = encode(root)?;

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!(parent = %parent.display(), "creating catalog directory");
            fs::create_dir_all(parent).map_err(|source| CatalogError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    fs::write(destination, &bytes).map_err(|source| CatalogError::Io {
        path: destination.to_path_buf(),
        source,
    })?;

    debug!(path = %destination.display(), bytes = bytes.len(), "catalog saved");
    Ok(())
}

/// Read and decode the catalog at `source`.
///
/// Fails with [`CatalogError::NotFound`] if `source` does not exist or is a
/// directory.
pub fn load(source: impl AsRef<Path>) -> Result<DirectoryNode, CatalogError> {
    let source = source.as_ref();

    if source.is_dir() {
        return Err(CatalogError::NotFound {
            path: source.to_path_buf(),
        });
    }

    let bytes = fs::read(source).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => CatalogError::NotFound {
            path: source.to_path_buf(),
        },
        _ => CatalogError::Io {
            path: source.to_path_buf(),
            source: err,
        },
    })?;

    debug!(path = %source.display(), bytes = bytes.len(), "catalog read");
    decode(&bytes)
}
