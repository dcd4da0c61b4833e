//! Non-recursive, pattern-filtered directory listing
//!
//! Only regular files are yielded: subdirectories, symlinks and special files are passed over
//! silently.

use tracing::instrument;

use crate::filter::NamePattern;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{path:?} does not exist or is not a directory")]
    NotADirectory { path: std::path::PathBuf },
    #[error("cannot open directory {path:?} for reading: {source}")]
    ReadDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file found by a scan, a potential subject for linking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: std::path::PathBuf,
    pub name: std::ffi::OsString,
}

/// Sequence of [`CandidateFile`]s in one directory, in file name order.
///
/// Names are listed and sorted when the scan starts, file types are checked as the iterator
/// advances.
#[derive(Debug)]
pub struct Scan {
    dir: std::path::PathBuf,
    pattern: NamePattern,
    entries: std::vec::IntoIter<CandidateFile>,
}

impl Scan {
    /// Starts the same scan again from the beginning.
    pub fn restart(&self) -> Result<Scan, Error> {
        scan(&self.dir, &self.pattern)
    }
}

impl Iterator for Scan {
    type Item = CandidateFile;

    fn next(&mut self) -> Option<CandidateFile> {
        for candidate in self.entries.by_ref() {
            // symlink_metadata does not follow symlinks
            match std::fs::symlink_metadata(&candidate.path) {
                Ok(metadata) if metadata.is_file() => return Some(candidate),
                Ok(_) => {
                    tracing::debug!("{:?} is not a regular file, ignoring", &candidate.path);
                }
                Err(error) => {
                    tracing::debug!("cannot read file type of {:?}: {}", &candidate.path, error);
                }
            }
        }
        None
    }
}

/// Opens `dir` for scanning.
///
/// Checks once, up front, that `dir` is an existing directory. Matching entries are sorted by
/// file name so that name collisions are resolved in the same order on every filesystem.
#[instrument]
pub fn scan(dir: &std::path::Path, pattern: &NamePattern) -> Result<Scan, Error> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    let entries = std::fs::read_dir(dir).map_err(|source| Error::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut candidates = vec![];
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!("failed traversing directory {:?}: {}", dir, error);
                continue;
            }
        };
        let path = entry.path();
        if !pattern.matches(&path) {
            tracing::trace!("{:?} does not match '{}'", &path, pattern);
            continue;
        }
        candidates.push(CandidateFile {
            path,
            name: entry.file_name(),
        });
    }
    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Scan {
        dir: dir.to_path_buf(),
        pattern: pattern.clone(),
        entries: candidates.into_iter(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(scan: Scan) -> Vec<String> {
        let mut names: Vec<String> = scan
            .map(|candidate| candidate.name.to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn yields_matching_regular_files_only() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::write(root.join("a.pdf"), "a").unwrap();
        std::fs::write(root.join("b.pdf"), "b").unwrap();
        std::fs::write(root.join("notes.txt"), "n").unwrap();
        std::fs::create_dir(root.join("sub.pdf")).unwrap();
        std::fs::write(root.join("sub.pdf").join("nested.pdf"), "x").unwrap();
        std::os::unix::fs::symlink(root.join("a.pdf"), root.join("link.pdf")).unwrap();
        let pattern = NamePattern::parse("*.pdf").unwrap();
        assert_eq!(names(scan(root, &pattern).unwrap()), ["a.pdf", "b.pdf"]);
    }

    #[test]
    fn candidate_path_is_inside_scanned_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.pdf"), "a").unwrap();
        let pattern = NamePattern::parse("*.pdf").unwrap();
        let candidates: Vec<_> = scan(tmp.path(), &pattern).unwrap().collect();
        assert_eq!(
            candidates,
            [CandidateFile {
                path: tmp.path().join("a.pdf"),
                name: "a.pdf".into(),
            }]
        );
    }

    #[test]
    fn restart_yields_same_set() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["x.pdf", "y.pdf", "z.pdf"] {
            std::fs::write(tmp.path().join(name), name).unwrap();
        }
        let pattern = NamePattern::parse("*.pdf").unwrap();
        let first = scan(tmp.path(), &pattern).unwrap();
        let second = first.restart().unwrap();
        assert_eq!(names(first), names(second));
    }

    #[test]
    fn missing_or_file_source_is_not_a_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let pattern = NamePattern::parse("*.pdf").unwrap();
        let missing = tmp.path().join("missing");
        assert!(matches!(
            scan(&missing, &pattern),
            Err(Error::NotADirectory { .. })
        ));
        let file = tmp.path().join("file.pdf");
        std::fs::write(&file, "f").unwrap();
        assert!(matches!(
            scan(&file, &pattern),
            Err(Error::NotADirectory { .. })
        ));
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let pattern = NamePattern::parse("*.pdf").unwrap();
        assert_eq!(scan(tmp.path(), &pattern).unwrap().count(), 0);
    }

    #[test]
    fn yields_candidates_in_name_order() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["c.pdf", "report_1.pdf", "a.pdf", "report.pdf"] {
            std::fs::write(tmp.path().join(name), name).unwrap();
        }
        let pattern = NamePattern::parse("*.pdf").unwrap();
        let order: Vec<String> = scan(tmp.path(), &pattern)
            .unwrap()
            .map(|candidate| candidate.name.to_string_lossy().into_owned())
            .collect();
        assert_eq!(order, ["a.pdf", "c.pdf", "report.pdf", "report_1.pdf"]);
    }

    #[test]
    fn entry_removed_after_listing_is_passed_over() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.pdf"), "a").unwrap();
        std::fs::write(tmp.path().join("b.pdf"), "b").unwrap();
        let pattern = NamePattern::parse("*.pdf").unwrap();
        let listing = scan(tmp.path(), &pattern).unwrap();
        std::fs::remove_file(tmp.path().join("a.pdf")).unwrap();
        assert_eq!(names(listing), ["b.pdf"]);
    }
}
