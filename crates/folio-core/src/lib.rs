//! Folio Core Library
//!
//! Site configuration, front-matter parsing, and the schema validation that
//! decides which content entries make it into the Folio site build.

pub mod collection;
pub mod config;
pub mod content;
pub mod date;
pub mod error;
pub mod frontmatter;
pub mod record;
pub mod validate;
pub mod value;

pub use collection::{Collection, validate};
pub use config::Config;
pub use content::{ContentPath, ContentType, Entry};
pub use error::{CoreError, Result};
pub use record::{ProjectRecord, Record, StoreRecord};
pub use validate::{ValidationFailure, Violation, ViolationKind};
pub use value::{RawRecord, RawValue, ValueShape};
