//! Common library for rhardlink
//!
//! Replicates files from a source directory into a destination directory as hard links, creating
//! at most one link per on-disk object no matter how many names it has or how often the tool is
//! run.
//!
//! The run is a single sequential pipeline:
//!
//! 1. [`index::DestinationIndex::build`] records which objects already have a link in the
//!    destination.
//! 2. [`scan::scan`] lists the matching regular files in the source.
//! 3. [`plan::plan`] skips objects that are already represented and picks a free name for the
//!    rest.
//! 4. [`link::execute`] creates the link and records it in the index.
//! 5. [`summary::Summary`] counts every candidate exactly once.
//!
//! Both scans are non-recursive. Hard links cannot cross filesystems, so a destination on a
//! different filesystem than the source makes every link fail (and be counted as skipped).
//!
//! # Examples
//!
//! ```no_run
//! use common::{config::Settings, filter::NamePattern};
//! use std::path::Path;
//!
//! let settings = Settings {
//!     pattern: NamePattern::parse("*.pdf").unwrap(),
//!     dry_run: false,
//! };
//! let summary = common::replicate(Path::new("/data/in"), Path::new("/data/out"), &settings)
//!     .unwrap();
//! assert!(summary.is_balanced());
//! ```

pub mod config;
pub mod filter;
pub mod identity;
pub mod index;
pub mod link;
pub mod plan;
pub mod replicate;
pub mod scan;
pub mod summary;

pub use config::{OutputConfig, Settings};
pub use replicate::replicate;
pub use summary::Summary;

fn init_logging(output: &OutputConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(output.log_level()));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .with_target(output.verbose > 0)
        .without_time()
        .try_init();
    if let Err(error) = result {
        eprintln!("failed to initialize logging: {error}");
    }
}

/// Sets up logging and runs `func`.
///
/// Returns `None` if `func` failed, after logging the error. Callers turn that into a non-zero
/// exit status.
pub fn run<T, E, Func>(output: OutputConfig, func: Func) -> Option<T>
where
    E: std::fmt::Display,
    Func: FnOnce() -> Result<T, E>,
{
    init_logging(&output);
    match func() {
        Ok(summary) => Some(summary),
        Err(error) => {
            tracing::error!("{:#}", &error);
            None
        }
    }
}
