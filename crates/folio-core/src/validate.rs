//! Field-level checks and violation reporting.
//!
//! Every check records its failure and keeps going, so a rejected record
//! carries all of its violations rather than the first one found.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    collection::Collection,
    date::coerce_date,
    value::{RawRecord, RawValue, ValueShape},
};

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A required field is absent.
    Missing,
    /// The value has the wrong shape.
    InvalidType {
        expected: &'static str,
        found: ValueShape,
    },
    /// A required string is empty or whitespace.
    Empty,
    /// The value could not be coerced to a date.
    InvalidDate { found: ValueShape },
    /// The tag list repeats one or more values.
    DuplicateTags { duplicates: Vec<String> },
}

/// A single field violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field path, e.g. `title` or `tags[2]`.
    pub field: String,
    pub kind: ViolationKind,
}

impl Violation {
    fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Top-level field name (`tags[2]` belongs to `tags`).
    pub fn root_field(&self) -> &str {
        self.field
            .split_once('[')
            .map_or(self.field.as_str(), |(root, _)| root)
    }

    /// The constraint the field failed.
    pub fn expected(&self) -> &'static str {
        match &self.kind {
            ViolationKind::Missing => "required field",
            ViolationKind::InvalidType { expected, .. } => expected,
            ViolationKind::Empty => "non-empty string",
            ViolationKind::InvalidDate { .. } => "date",
            ViolationKind::DuplicateTags { .. } => "unique tags",
        }
    }

    /// Shape of the offending value, if there was one.
    pub fn found(&self) -> Option<ValueShape> {
        match &self.kind {
            ViolationKind::Missing => None,
            ViolationKind::InvalidType { found, .. } | ViolationKind::InvalidDate { found } => {
                Some(*found)
            }
            ViolationKind::Empty => Some(ValueShape::String),
            ViolationKind::DuplicateTags { .. } => Some(ValueShape::Sequence),
        }
    }

    pub fn is_duplicate_tags(&self) -> bool {
        matches!(self.kind, ViolationKind::DuplicateTags { .. })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{}: required", self.field),
            ViolationKind::InvalidType { expected, found } => {
                write!(f, "{}: expected {expected}, found {found}", self.field)
            }
            ViolationKind::Empty => write!(f, "{}: must not be empty", self.field),
            ViolationKind::InvalidDate { found } => {
                write!(f, "{}: expected a date, could not coerce {found}", self.field)
            }
            ViolationKind::DuplicateTags { duplicates } => write!(
                f,
                "{}: tags must be unique (repeated: {})",
                self.field,
                duplicates.join(", ")
            ),
        }
    }
}

/// All violations found on one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {collection} record: {}", join_violations(.violations))]
pub struct ValidationFailure {
    pub collection: Collection,
    pub violations: Vec<Violation>,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationFailure {
    /// Violations grouped by top-level field, in field order.
    pub fn by_field(&self) -> BTreeMap<&str, Vec<&Violation>> {
        let mut grouped: BTreeMap<&str, Vec<&Violation>> = BTreeMap::new();
        for violation in &self.violations {
            grouped
                .entry(violation.root_field())
                .or_default()
                .push(violation);
        }
        grouped
    }

    /// Whether any violation is attributed to `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.root_field() == field)
    }
}

/// Accumulates field checks against one raw record.
pub(crate) struct FieldChecker<'a> {
    raw: &'a RawRecord,
    violations: Vec<Violation>,
}

impl<'a> FieldChecker<'a> {
    pub(crate) fn new(raw: &'a RawRecord) -> Self {
        Self {
            raw,
            violations: Vec::new(),
        }
    }

    fn reject(&mut self, field: impl Into<String>, kind: ViolationKind) {
        self.violations.push(Violation::new(field, kind));
    }

    fn present(&mut self, field: &str, required: bool) -> Option<&'a RawValue> {
        let raw = self.raw;
        let value = raw.get(field);
        if value.is_none() && required {
            self.reject(field, ViolationKind::Missing);
        }
        value
    }

    fn string(&mut self, field: &str, value: &RawValue) -> Option<String> {
        match value {
            RawValue::String(s) => Some(s.clone()),
            other => {
                self.reject(
                    field,
                    ViolationKind::InvalidType {
                        expected: "string",
                        found: other.shape(),
                    },
                );
                None
            }
        }
    }

    /// A present, non-empty string.
    pub(crate) fn required_str(&mut self, field: &str) -> Option<String> {
        let value = self.present(field, true)?;
        let s = self.string(field, value)?;
        if s.trim().is_empty() {
            self.reject(field, ViolationKind::Empty);
            return None;
        }
        Some(s)
    }

    /// A string if present. Outer `Err(())` means the field was rejected.
    pub(crate) fn optional_str(&mut self, field: &str) -> Result<Option<String>, ()> {
        match self.present(field, false) {
            None => Ok(None),
            Some(value) => self.string(field, value).map(Some).ok_or(()),
        }
    }

    /// A present value that coerces to a date.
    pub(crate) fn required_date(&mut self, field: &str) -> Option<DateTime<Utc>> {
        let value = self.present(field, true)?;
        let date = coerce_date(value);
        if date.is_none() {
            self.reject(
                field,
                ViolationKind::InvalidDate {
                    found: value.shape(),
                },
            );
        }
        date
    }

    /// A sequence of pairwise distinct strings, if present.
    pub(crate) fn optional_unique_strings(
        &mut self,
        field: &str,
    ) -> Result<Option<Vec<String>>, ()> {
        let Some(value) = self.present(field, false) else {
            return Ok(None);
        };
        let RawValue::Sequence(items) = value else {
            self.reject(
                field,
                ViolationKind::InvalidType {
                    expected: "sequence of strings",
                    found: value.shape(),
                },
            );
            return Err(());
        };

        let mut strings = Vec::with_capacity(items.len());
        let mut type_ok = true;
        for (index, item) in items.iter().enumerate() {
            match item {
                RawValue::String(s) => strings.push(s.clone()),
                other => {
                    type_ok = false;
                    self.reject(
                        format!("{field}[{index}]"),
                        ViolationKind::InvalidType {
                            expected: "string",
                            found: other.shape(),
                        },
                    );
                }
            }
        }
        if !type_ok {
            return Err(());
        }

        let duplicates = find_duplicates(&strings);
        if !duplicates.is_empty() {
            self.reject(field, ViolationKind::DuplicateTags { duplicates });
            return Err(());
        }

        Ok(Some(strings))
    }

    /// Return the assembled record, or every violation seen.
    pub(crate) fn finish<T>(
        self,
        collection: Collection,
        record: Option<T>,
    ) -> Result<T, ValidationFailure> {
        match record {
            Some(record) if self.violations.is_empty() => Ok(record),
            _ => Err(ValidationFailure {
                collection,
                violations: self.violations,
            }),
        }
    }
}

/// Values that occur more than once, in order of first repetition.
fn find_duplicates(items: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(items.len());
    let mut duplicates: Vec<String> = Vec::new();
    for item in items {
        if !seen.insert(item.as_str()) && !duplicates.contains(item) {
            duplicates.push(item.clone());
        }
    }
    duplicates
}
