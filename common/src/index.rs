//! In-memory record of storage objects already represented in the destination

use std::collections::{HashMap, HashSet};
use tracing::instrument;

use crate::filter::NamePattern;
use crate::identity::{self, StorageIdentity};
use crate::scan;

/// Mapping from storage identity to the destination entry that represents it.
///
/// Append-only: once an identity is recorded it keeps its first path for the rest of the run.
#[derive(Debug, Default)]
pub struct DestinationIndex {
    by_identity: HashMap<StorageIdentity, std::path::PathBuf>,
    // every destination path recorded so far, including dry-run plans that never hit the disk
    reserved: HashSet<std::path::PathBuf>,
}

impl DestinationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes the matching regular files directly under `dst`.
    ///
    /// Best effort: an entry whose identity cannot be resolved is left out without a warning.
    #[instrument]
    pub fn build(dst: &std::path::Path, pattern: &NamePattern) -> Result<Self, scan::Error> {
        let mut index = Self::new();
        let mut unreadable = 0;
        for candidate in scan::scan(dst, pattern)? {
            match identity::identity(&candidate.path) {
                Ok(identity) => {
                    index.insert(identity, candidate.path);
                }
                Err(error) => {
                    tracing::debug!("not indexing: {}", error);
                    unreadable += 1;
                }
            }
        }
        tracing::info!(
            "indexed {} existing entries in {:?} ({} unreadable)",
            index.len(),
            dst,
            unreadable
        );
        Ok(index)
    }

    /// Destination path already representing `identity`, if any
    pub fn get(&self, identity: &StorageIdentity) -> Option<&std::path::Path> {
        self.by_identity.get(identity).map(|path| path.as_path())
    }

    /// True if `path` was recorded earlier in this run
    pub fn is_reserved(&self, path: &std::path::Path) -> bool {
        self.reserved.contains(path)
    }

    /// Records `identity -> path`. Returns false, leaving the index unchanged, if the identity is
    /// already present.
    pub fn insert(&mut self, identity: StorageIdentity, path: std::path::PathBuf) -> bool {
        if self.by_identity.contains_key(&identity) {
            return false;
        }
        self.reserved.insert(path.clone());
        self.by_identity.insert(identity, path);
        true
    }

    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }
}
