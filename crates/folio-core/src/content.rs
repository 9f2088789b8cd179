//! Content types and structures.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    collection::Collection,
    config::SiteConfig,
    error::Result,
    frontmatter::parse_frontmatter,
    record::Record,
};

/// Type of content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Markdown content (.md files).
    Markdown,
    /// MDX content (.mdx files).
    Mdx,
}

impl ContentType {
    /// Determine content type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "mdx" => Some(Self::Mdx),
            _ => None,
        }
    }

    /// Get the file extension for this content type.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Mdx => "mdx",
        }
    }
}

/// Location of a content file inside its collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath {
    /// Path relative to the collection directory.
    pub path: PathBuf,

    /// Collection the file is stored under.
    pub collection: Collection,

    /// Entry id: the path without extension, `/`-separated.
    pub id: String,

    /// Content type based on extension.
    pub content_type: ContentType,
}

impl ContentPath {
    /// Parse a path relative to the collection directory.
    ///
    /// - `hello.md` → id `hello`
    /// - `2024/hello.mdx` → id `2024/hello`
    /// - `hello/index.md` → id `hello`
    pub fn from_path(path: &Path, collection: Collection) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        let content_type = ContentType::from_extension(extension)?;

        let stem = path.file_stem()?.to_str()?;
        let parent = path.parent().unwrap_or(Path::new(""));
        let parent = parent
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        let id = if stem == "index" {
            parent
        } else if parent.is_empty() {
            stem.to_string()
        } else {
            format!("{parent}/{stem}")
        };

        let id = id.trim_matches('/').to_string();
        if id.is_empty() {
            return None;
        }

        Some(Self {
            path: path.to_path_buf(),
            collection,
            id,
            content_type,
        })
    }
}

/// A validated content entry ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Entry id within its collection.
    pub id: String,

    /// URL slug within its collection.
    pub slug: String,

    pub collection: Collection,

    /// The normalized front-matter.
    pub record: Record,

    /// Document body, passed through untouched.
    pub body: String,

    pub content_type: ContentType,

    /// Source file path.
    pub source_path: PathBuf,
}

impl Entry {
    /// Parse a content file and validate it against its collection.
    pub fn parse(source: &str, content_path: &ContentPath, site: &SiteConfig) -> Result<Self> {
        let (raw, body) = parse_frontmatter(source, &content_path.path)?;
        let record = content_path.collection.validate(&raw)?;

        let slug = if site.generate_slug_from_title {
            let slug = slugify(record.title());
            if slug.is_empty() {
                content_path.id.clone()
            } else {
                slug
            }
        } else {
            content_path.id.clone()
        };

        Ok(Self {
            id: content_path.id.clone(),
            slug,
            collection: content_path.collection,
            record,
            body,
            content_type: content_path.content_type,
            source_path: content_path.path.clone(),
        })
    }

    /// Get the URL path for this entry.
    pub fn url_path(&self) -> String {
        format!("/{}/{}", self.collection, self.slug)
    }
}

/// Lowercase a title into a URL slug: alphanumerics kept, every other run of
/// characters collapsed into one `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
