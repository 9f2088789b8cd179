//! Validation report types.

use std::fmt::Write as _;

use folio_core::{Collection, CoreError};

use crate::collector::{CollectionSet, EntryFailure};

/// Summary of a collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Number of content files read.
    pub scanned: usize,
    /// Number of files accepted into the build.
    pub accepted: usize,
    /// Number of files rejected.
    pub rejected: usize,
    /// Configured collections with no directory on disk.
    pub missing: Vec<Collection>,
}

impl ValidationReport {
    /// Summarize a collected set.
    pub fn from_set(set: &CollectionSet) -> Self {
        Self {
            scanned: set.scanned,
            accepted: set.accepted(),
            rejected: set.failures.len(),
            missing: set.missing.clone(),
        }
    }

    /// Whether every scanned file passed.
    pub fn ok(&self) -> bool {
        self.rejected == 0
    }
}

impl EntryFailure {
    /// Format the failure for human-readable output.
    ///
    /// Validation failures list one line per field; other failures are a
    /// single line.
    pub fn format_human_readable(&self) -> String {
        let mut out = format!("{} ({})", self.path.display(), self.collection);

        match &self.error {
            CoreError::Validation(failure) => {
                for (field, violations) in failure.by_field() {
                    let _ = write!(out, "\n    {field}:");
                    for violation in violations {
                        let _ = write!(out, "\n      - {violation}");
                    }
                }
            }
            other => {
                let _ = write!(out, "\n    {other}");
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use folio_core::{RawRecord, RawValue};

    use super::*;

    #[test]
    fn test_format_validation_failure() {
        let mut raw = RawRecord::new();
        raw.insert("pubDate".into(), RawValue::from("2024-01-15"));
        raw.insert("updatedDate".into(), RawValue::from("nope"));
        raw.insert("tags".into(), RawValue::from(vec!["a", "a"]));

        let error = folio_core::validate("projects", &raw).unwrap_err();
        let failure = EntryFailure {
            path: PathBuf::from("src/content/projects/bad.md"),
            collection: Collection::Projects,
            error,
        };

        let text = failure.format_human_readable();
        assert!(text.starts_with("src/content/projects/bad.md (projects)"));
        assert!(text.contains("    title:\n      - title: required"));
        assert!(text.contains("updatedDate: expected a date, could not coerce string"));
        assert!(text.contains("tags must be unique (repeated: a)"));
    }

    #[test]
    fn test_format_other_failure() {
        let failure = EntryFailure {
            path: PathBuf::from("src/content/store/x.md"),
            collection: Collection::Store,
            error: CoreError::frontmatter("x.md", "unterminated frontmatter block"),
        };
        let text = failure.format_human_readable();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("unterminated"));
    }

    #[test]
    fn test_report_from_empty_set() {
        let report = ValidationReport::from_set(&CollectionSet::default());
        assert!(report.ok());
        assert_eq!(report.scanned, 0);
    }
}
