//! On-disk object identity
//!
//! Two directory entries on the same filesystem refer to the same object exactly when their
//! device and inode numbers match. This is what decides whether a file "is already linked",
//! names and contents play no part in it.

use std::os::unix::fs::MetadataExt;
use tracing::instrument;

/// Opaque identifier of a storage object: (device, inode).
///
/// Only equality and hashing are defined on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorageIdentity {
    dev: u64,
    ino: u64,
}

impl StorageIdentity {
    #[must_use]
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot stat {path:?}: {source}")]
    Stat {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?} is not a regular file")]
    NotAFile { path: std::path::PathBuf },
}

/// Resolves the storage identity of a regular file.
///
/// Symlinks are not followed: a symlink is not a regular file and fails with
/// [`Error::NotAFile`].
#[instrument]
pub fn identity(path: &std::path::Path) -> Result<StorageIdentity, Error> {
    let metadata = std::fs::symlink_metadata(path).map_err(|source| Error::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    if !metadata.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(StorageIdentity::from_metadata(&metadata))
}
