//! Declared content collections.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    record::{ProjectRecord, Record, StoreRecord},
    validate::ValidationFailure,
    value::RawRecord,
};

/// A named group of content entries sharing one schema.
///
/// Membership comes from where a file is stored (`<content>/projects/...`),
/// never from a field inside the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Projects,
    Store,
}

impl Collection {
    /// Every collection with a schema.
    pub const ALL: [Self; 2] = [Self::Projects, Self::Store];

    /// Directory / configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Store => "store",
        }
    }

    /// Validate a raw record against this collection's schema.
    pub fn validate(&self, raw: &RawRecord) -> std::result::Result<Record, ValidationFailure> {
        match self {
            Self::Projects => ProjectRecord::from_raw(raw).map(Record::Project),
            Self::Store => StoreRecord::from_raw(raw).map(Record::Store),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "projects" => Ok(Self::Projects),
            "store" => Ok(Self::Store),
            other => Err(CoreError::UnknownCollection(other.to_string())),
        }
    }
}

/// Validate a raw record for the named collection.
///
/// An unknown name is a configuration error ([`CoreError::UnknownCollection`]);
/// a record that breaks the schema yields [`CoreError::Validation`] carrying
/// every violation.
pub fn validate(collection_name: &str, raw: &RawRecord) -> Result<Record> {
    let collection: Collection = collection_name.parse()?;
    Ok(collection.validate(raw)?)
}
