use enum_map::{Enum, EnumMap};

/// Terminal state of one candidate
#[derive(Copy, Clone, Debug, Enum, PartialEq, Eq)]
pub enum Outcome {
    Linked,
    /// object already represented in the destination
    AlreadyLinked,
    /// identity could not be resolved
    Unreadable,
    /// link creation failed
    Failed,
}

impl Outcome {
    pub fn is_skip(self) -> bool {
        !matches!(self, Outcome::Linked)
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Summary {
    pub processed: u64,
    pub outcomes: EnumMap<Outcome, u64>,
}

impl Summary {
    /// Counts one processed candidate and its terminal outcome.
    pub fn record(&mut self, outcome: Outcome) {
        self.processed += 1;
        self.outcomes[outcome] += 1;
    }

    pub fn linked(&self) -> u64 {
        self.outcomes[Outcome::Linked]
    }

    pub fn skipped(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| outcome.is_skip())
            .map(|(_, &count)| count)
            .sum()
    }

    /// processed == linked + skipped
    pub fn is_balanced(&self) -> bool {
        self.processed == self.linked() + self.skipped()
    }

    /// Final report block: the counters followed by the destination directory.
    pub fn report(&self, dst: &std::path::Path) -> String {
        format!("{}destination: {}\n", self, dst.display())
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "files processed: {}", self.processed)?;
        writeln!(f, "links created: {}", self.linked())?;
        writeln!(
            f,
            "files skipped: {} (already linked: {}, unreadable: {}, link failed: {})",
            self.skipped(),
            self.outcomes[Outcome::AlreadyLinked],
            self.outcomes[Outcome::Unreadable],
            self.outcomes[Outcome::Failed]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_counts_balanced() {
        let mut summary = Summary::default();
        summary.record(Outcome::Linked);
        summary.record(Outcome::AlreadyLinked);
        summary.record(Outcome::Failed);
        summary.record(Outcome::Unreadable);
        summary.record(Outcome::Linked);
        assert_eq!(summary.processed, 5);
        assert_eq!(summary.linked(), 2);
        assert_eq!(summary.skipped(), 3);
        assert!(summary.is_balanced());
    }

    #[test]
    fn report_lists_totals_and_destination() {
        let mut summary = Summary::default();
        summary.record(Outcome::Linked);
        summary.record(Outcome::Failed);
        let report = summary.report(std::path::Path::new("/data/out"));
        assert_eq!(
            report,
            "files processed: 2\n\
             links created: 1\n\
             files skipped: 1 (already linked: 0, unreadable: 0, link failed: 1)\n\
             destination: /data/out\n"
        );
    }
}
