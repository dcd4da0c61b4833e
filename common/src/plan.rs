use tracing::instrument;

use crate::identity::{self, StorageIdentity};
use crate::index::DestinationIndex;
use crate::scan::CandidateFile;

/// What to do with one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// the object already has a link in the destination
    Skip { existing: std::path::PathBuf },
    /// link the candidate at `dst`, a name that is currently free
    CreateAt {
        dst: std::path::PathBuf,
        identity: StorageIdentity,
    },
}

/// Returns `name` with `_<n>` inserted before its last extension: `report.pdf` -> `report_1.pdf`.
///
/// Names without an extension (including dotfiles like `.profile`) get the suffix appended.
pub fn suffixed_name(name: &std::ffi::OsStr, n: u64) -> std::ffi::OsString {
    let path = std::path::Path::new(name);
    let mut suffixed = path.file_stem().unwrap_or(name).to_os_string();
    suffixed.push(format!("_{n}"));
    if let Some(extension) = path.extension() {
        suffixed.push(".");
        suffixed.push(extension);
    }
    suffixed
}

/// Returns the first of `name`, `name_1`, `name_2`, ... under `dst_dir` for which `is_taken` is
/// false.
pub fn free_name(
    dst_dir: &std::path::Path,
    name: &std::ffi::OsStr,
    is_taken: impl Fn(&std::path::Path) -> bool,
) -> std::path::PathBuf {
    let mut candidate = dst_dir.join(name);
    let mut n = 0;
    while is_taken(&candidate) {
        n += 1;
        candidate = dst_dir.join(suffixed_name(name, n));
    }
    candidate
}

// a dangling symlink still occupies its name, so don't follow links here
fn name_exists(path: &std::path::Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Decides whether `candidate` needs a new link in `dst_dir` and under which name.
///
/// Collisions are resolved by name: a destination entry with the candidate's name but a
/// different identity is never overwritten, the candidate gets a suffixed name instead.
#[instrument(skip(index))]
pub fn plan(
    candidate: &CandidateFile,
    index: &DestinationIndex,
    dst_dir: &std::path::Path,
) -> Result<Plan, identity::Error> {
    let identity = identity::identity(&candidate.path)?;
    if let Some(existing) = index.get(&identity) {
        tracing::debug!("{:?} already linked as {:?}", &candidate.path, existing);
        return Ok(Plan::Skip {
            existing: existing.to_path_buf(),
        });
    }
    let dst = free_name(dst_dir, &candidate.name, |path| {
        index.is_reserved(path) || name_exists(path)
    });
    tracing::debug!("{:?} will be linked as {:?}", &candidate.path, &dst);
    Ok(Plan::CreateAt { dst, identity })
}
