//! Configuration types for replication runs and output

use crate::filter::NamePattern;

/// Settings for a single replication run
#[derive(Debug, Clone)]
pub struct Settings {
    /// glob applied to file names in both the source and the destination
    pub pattern: NamePattern,
    /// plan and report links without creating them
    pub dry_run: bool,
}

/// Output and logging configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress warnings
    pub quiet: bool,
    /// Verbosity level: 0=WARN, 1=INFO, 2=DEBUG, 3=TRACE
    pub verbose: u8,
}

impl OutputConfig {
    /// Log filter directive matching the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "off";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
