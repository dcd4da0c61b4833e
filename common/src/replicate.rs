use anyhow::Context;
use tracing::instrument;

use crate::config::Settings;
use crate::index::DestinationIndex;
use crate::link;
use crate::plan::{self, Plan};
use crate::scan::{self, CandidateFile};
use crate::summary::{Outcome, Summary};

/// Fatal replication error, carrying whatever was counted before the run stopped.
///
/// Log it with `{:#}` to keep the whole error chain.
#[derive(Debug, thiserror::Error)]
#[error("{source:#}")]
pub struct Error {
    #[source]
    pub source: anyhow::Error,
    pub summary: Summary,
}

impl Error {
    #[must_use]
    pub fn new(source: anyhow::Error, summary: Summary) -> Self {
        Error { source, summary }
    }
}

fn display_name(path: &std::path::Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}

/// Plans and links a single candidate, returning its terminal outcome.
///
/// Per-file problems are reported as warnings and never abort the run.
fn process(
    candidate: &CandidateFile,
    dst: &std::path::Path,
    index: &mut DestinationIndex,
    settings: &Settings,
) -> Outcome {
    let (target, identity) = match plan::plan(candidate, index, dst) {
        Ok(Plan::Skip { .. }) => return Outcome::AlreadyLinked,
        Ok(Plan::CreateAt { dst, identity }) => (dst, identity),
        Err(error) => {
            tracing::warn!("skipping {:?}: {}", &candidate.path, error);
            return Outcome::Unreadable;
        }
    };
    match link::execute(&candidate.path, &target, identity, index, settings.dry_run) {
        Ok(()) => {
            println!(
                "{}: {} -> {}",
                if settings.dry_run {
                    "Would link"
                } else {
                    "Linked"
                },
                display_name(&candidate.path),
                display_name(&target)
            );
            Outcome::Linked
        }
        Err(error) => {
            tracing::warn!("{}", error);
            Outcome::Failed
        }
    }
}

/// Hard-links every matching file directly under `src` into `dst`, at most once per storage
/// object.
///
/// The destination is created if missing and indexed once before any candidate is processed.
/// Only precondition failures are returned as errors; a run that gets past them always
/// succeeds, with per-file failures counted as skipped.
#[instrument]
pub fn replicate(
    src: &std::path::Path,
    dst: &std::path::Path,
    settings: &Settings,
) -> Result<Summary, Error> {
    let candidates = scan::scan(src, &settings.pattern)
        .map_err(|err| Error::new(err.into(), Default::default()))?;
    let mut index = if settings.dry_run && !dst.exists() {
        tracing::info!("destination {:?} does not exist yet", dst);
        DestinationIndex::new()
    } else {
        std::fs::create_dir_all(dst)
            .with_context(|| format!("cannot create destination directory {:?}", dst))
            .map_err(|err| Error::new(err, Default::default()))?;
        DestinationIndex::build(dst, &settings.pattern)
            .map_err(|err| Error::new(err.into(), Default::default()))?
    };
    let mut summary = Summary::default();
    for candidate in candidates {
        let outcome = process(&candidate, dst, &mut index, settings);
        tracing::debug!("{:?}: {:?}", &candidate.path, outcome);
        summary.record(outcome);
    }
    debug_assert!(summary.is_balanced());
    Ok(summary)
}
