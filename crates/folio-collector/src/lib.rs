//! Folio Collector Library
//!
//! Discovers content files per collection and validates them in parallel.
//!
//! # Modules
//!
//! - [`collector`] - Directory walking and per-file validation
//! - [`report`] - Run summaries and human-readable failure output

pub mod collector;
pub mod report;

pub use collector::{CollectionSet, CollectorError, ContentCollector, EntryFailure};
pub use report::ValidationReport;
