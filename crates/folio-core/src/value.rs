//! Untyped front-matter values.
//!
//! Front-matter arrives as YAML or TOML. Both are lowered into [`RawValue`] so
//! the schema checks in [`crate::validate`] see a single value model.

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

/// A raw front-matter record: field name to untyped value.
pub type RawRecord = BTreeMap<String, RawValue>;

/// An untyped front-matter value.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<RawValue>),
    Mapping(RawRecord),
    /// A native date/time value (TOML datetimes).
    DateTime(DateTime<Utc>),
}

/// The observed shape of a raw value, used in violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Sequence,
    Mapping,
    DateTime,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

impl RawValue {
    /// Shape of this value.
    pub fn shape(&self) -> ValueShape {
        match self {
            Self::Null => ValueShape::Null,
            Self::Bool(_) => ValueShape::Bool,
            Self::Integer(_) => ValueShape::Integer,
            Self::Float(_) => ValueShape::Float,
            Self::String(_) => ValueShape::String,
            Self::Sequence(_) => ValueShape::Sequence,
            Self::Mapping(_) => ValueShape::Mapping,
            Self::DateTime(_) => ValueShape::DateTime,
        }
    }

    /// Borrow the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(values: Vec<T>) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl From<serde_yaml::Value> for RawValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else {
                    // u64 beyond i64::MAX and real floats both land here
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Self::String(s),
            Value::Sequence(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Mapping(yaml_mapping_to_record(map)),
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}

impl From<toml::Value> for RawValue {
    fn from(value: toml::Value) -> Self {
        use toml::Value;

        match value {
            Value::String(s) => Self::String(s),
            Value::Integer(i) => Self::Integer(i),
            Value::Float(f) => Self::Float(f),
            Value::Boolean(b) => Self::Bool(b),
            Value::Datetime(dt) => match toml_datetime_to_utc(&dt) {
                Some(utc) => Self::DateTime(utc),
                // bare times have no calendar date
                None => Self::String(dt.to_string()),
            },
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Table(table) => Self::Mapping(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Convert a YAML mapping into a record, keeping only scalar keys.
pub(crate) fn yaml_mapping_to_record(map: serde_yaml::Mapping) -> RawRecord {
    map.into_iter()
        .filter_map(|(key, value)| yaml_key(&key).map(|k| (k, RawValue::from(value))))
        .collect()
}

fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    match key {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn toml_datetime_to_utc(dt: &toml::value::Datetime) -> Option<DateTime<Utc>> {
    let date = dt.date?;
    let date = NaiveDate::from_ymd_opt(
        i32::from(date.year),
        u32::from(date.month),
        u32::from(date.day),
    )?;
    let time = match dt.time {
        Some(t) => NaiveTime::from_hms_nano_opt(
            u32::from(t.hour),
            u32::from(t.minute),
            u32::from(t.second),
            t.nanosecond,
        )?,
        None => NaiveTime::MIN,
    };
    let offset_minutes = match dt.offset {
        Some(toml::value::Offset::Custom { minutes }) => i32::from(minutes),
        Some(toml::value::Offset::Z) | None => 0,
    };
    let offset = FixedOffset::east_opt(offset_minutes * 60)?;
    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|d| d.with_timezone(&Utc))
}
