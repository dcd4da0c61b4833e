//! File name pattern matching for source and destination scans
//!
//! Both scans are non-recursive, so a pattern is matched against the entry's file name only.
//!
//! # Pattern Syntax
//!
//! - `*` matches anything except `/`
//! - `?` matches a single character (except `/`)
//! - `[...]` character classes
//! - `{a,b}` alternatives
//!
//! # Examples
//!
//! ```
//! use common::filter::NamePattern;
//! use std::path::Path;
//!
//! let pattern = NamePattern::parse("*.pdf").unwrap();
//! assert!(pattern.matches(Path::new("report.pdf")));
//! assert!(!pattern.matches(Path::new("report.txt")));
//! ```

/// Error produced when a pattern cannot be compiled
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("empty pattern is not allowed")]
    Empty,
    #[error("invalid glob pattern '{pattern}': {source}")]
    Invalid {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A compiled glob together with its original text
#[derive(Debug, Clone)]
pub struct NamePattern {
    /// original pattern string, used in log output
    pub original: String,
    matcher: globset::GlobMatcher,
}

impl NamePattern {
    /// Parse a pattern string into a NamePattern
    pub fn parse(pattern: &str) -> Result<Self, Error> {
        if pattern.is_empty() {
            return Err(Error::Empty);
        }
        let glob = globset::GlobBuilder::new(pattern)
            .literal_separator(true) // * doesn't match /
            .build()
            .map_err(|source| Error::Invalid {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            original: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }
    /// Check if the file name of `path` matches this pattern
    pub fn matches(&self, path: &std::path::Path) -> bool {
        match path.file_name() {
            Some(name) => self.matcher.is_match(std::path::Path::new(name)),
            None => false,
        }
    }
}

impl std::fmt::Display for NamePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    #[test]
    fn test_pattern_basic_glob() {
        let pattern = NamePattern::parse("*.pdf").unwrap();
        assert!(pattern.matches(Path::new("a.pdf")));
        assert!(pattern.matches(Path::new("report.pdf")));
        assert!(!pattern.matches(Path::new("report.txt")));
        assert!(!pattern.matches(Path::new("report.pdf.bak")));
    }
    #[test]
    fn test_pattern_matches_file_name_only() {
        let pattern = NamePattern::parse("*.pdf").unwrap();
        // the directory part of the path is ignored
        assert!(pattern.matches(Path::new("/some/dir/report.pdf")));
        assert!(!pattern.matches(Path::new("/some/dir.pdf/report.txt")));
    }
    #[test]
    fn test_pattern_question_mark() {
        let pattern = NamePattern::parse("file?.txt").unwrap();
        assert!(pattern.matches(Path::new("file1.txt")));
        assert!(!pattern.matches(Path::new("file12.txt")));
        assert!(!pattern.matches(Path::new("file.txt")));
    }
    #[test]
    fn test_pattern_character_class_and_alternatives() {
        let pattern = NamePattern::parse("[ab].{pdf,djvu}").unwrap();
        assert!(pattern.matches(Path::new("a.pdf")));
        assert!(pattern.matches(Path::new("b.djvu")));
        assert!(!pattern.matches(Path::new("c.pdf")));
    }
    #[test]
    fn test_empty_pattern_error() {
        assert!(matches!(NamePattern::parse(""), Err(Error::Empty)));
    }
    #[test]
    fn test_invalid_pattern_error() {
        let err = NamePattern::parse("[unclosed").unwrap_err();
        assert!(matches!(err, Error::Invalid { .. }));
        assert!(err.to_string().contains("[unclosed"));
    }
    #[test]
    fn test_root_path_never_matches() {
        let pattern = NamePattern::parse("*").unwrap();
        assert!(!pattern.matches(Path::new("/")));
    }
}
