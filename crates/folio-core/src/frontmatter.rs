//! Frontmatter parsing for content files.

use std::path::Path;

use crate::{
    error::{CoreError, Result},
    value::{RawRecord, RawValue, yaml_mapping_to_record},
};

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }

    /// The opening fence must be the whole first line.
    fn detect(content: &str) -> Option<Self> {
        match content.lines().next()?.trim_end() {
            "---" => Some(Self::Yaml),
            "+++" => Some(Self::Toml),
            _ => None,
        }
    }
}

fn strip_leading(content: &str) -> &str {
    content.trim_start_matches('\u{feff}').trim_start()
}

/// Split content into frontmatter and body.
///
/// Both delimiters must sit on their own line, so a `---` rule inside the
/// body never closes the block.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = strip_leading(content);
    let format = FrontmatterFormat::detect(content)?;
    let delimiter = format.delimiter();

    let (_, after_open) = content[delimiter.len()..].split_once('\n')?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = after_open[..offset].trim();
            let body = after_open[offset + line.len()..].trim_start();
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Parse frontmatter from a string into a raw record and the body.
///
/// A file without frontmatter yields an empty record and the whole file as
/// body; the schema then reports whatever is missing.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(RawRecord, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        if FrontmatterFormat::detect(strip_leading(content)).is_some() {
            return Err(CoreError::frontmatter(path, "unterminated frontmatter block"));
        }
        return Ok((RawRecord::new(), content.to_string()));
    };

    let record = match format {
        FrontmatterFormat::Yaml => parse_yaml_record(fm_str, path)?,
        FrontmatterFormat::Toml => {
            let table: toml::Table =
                toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            table
                .into_iter()
                .map(|(k, v)| (k, RawValue::from(v)))
                .collect()
        }
    };

    Ok((record, body.to_string()))
}

fn parse_yaml_record(fm_str: &str, path: &Path) -> Result<RawRecord> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    match value {
        serde_yaml::Value::Null => Ok(RawRecord::new()),
        serde_yaml::Value::Mapping(map) => Ok(yaml_mapping_to_record(map)),
        other => Err(CoreError::frontmatter(
            path,
            format!(
                "frontmatter must be a key/value mapping, found {}",
                RawValue::from(other).shape()
            ),
        )),
    }
}
