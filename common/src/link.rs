use tracing::instrument;

use crate::identity::StorageIdentity;
use crate::index::DestinationIndex;

/// Why a hard link could not be created.
///
/// None of these are retried: a cross-device link can never succeed, and the other cases need
/// someone to change the filesystem first.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot link {src:?} to {dst:?}: source and destination are on different filesystems")]
    CrossDevice {
        src: std::path::PathBuf,
        dst: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("cannot link {src:?} to {dst:?}: permission denied")]
    PermissionDenied {
        src: std::path::PathBuf,
        dst: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("cannot link {src:?} to {dst:?}: destination name was taken")]
    AlreadyExists {
        src: std::path::PathBuf,
        dst: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("cannot link {src:?} to {dst:?}: {source}")]
    Other {
        src: std::path::PathBuf,
        dst: std::path::PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    fn classify(src: &std::path::Path, dst: &std::path::Path, source: std::io::Error) -> Self {
        let src = src.to_path_buf();
        let dst = dst.to_path_buf();
        match source.kind() {
            std::io::ErrorKind::CrossesDevices => Error::CrossDevice { src, dst, source },
            std::io::ErrorKind::PermissionDenied => Error::PermissionDenied { src, dst, source },
            std::io::ErrorKind::AlreadyExists => Error::AlreadyExists { src, dst, source },
            _ => Error::Other { src, dst, source },
        }
    }
}

/// Creates `dst` as a hard link to `src` and records it in `index`.
///
/// In dry-run mode nothing is created on disk but the index is still updated, so later
/// candidates are planned as if the link existed.
#[instrument(skip(index))]
pub fn execute(
    src: &std::path::Path,
    dst: &std::path::Path,
    identity: StorageIdentity,
    index: &mut DestinationIndex,
    dry_run: bool,
) -> Result<(), Error> {
    if !dry_run {
        std::fs::hard_link(src, dst).map_err(|error| Error::classify(src, dst, error))?;
    }
    index.insert(identity, dst.to_path_buf());
    Ok(())
}
