//! New command - create a content entry from template

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Result, WrapErr, bail};
use folio_core::{Collection, ContentType};

/// Hero image used by project entries until a real one is chosen.
const DEFAULT_HERO_IMAGE: &str = "/post_img.webp";

/// Run the new command.
///
/// Creates `<content_dir>/<collection>/<name>.md` with frontmatter that
/// passes the collection's schema. Existing files are never overwritten.
pub fn run(
    content_dir: &Path,
    collection: &str,
    name: &Path,
    title: Option<&str>,
) -> Result<PathBuf> {
    tracing::info!(?content_dir, collection, ?name, "Creating new content");

    let collection: Collection = collection.parse().wrap_err("Invalid collection")?;

    let relative = entry_file_name(name)?;
    let file_path = content_dir.join(collection.name()).join(&relative);

    if file_path.exists() {
        bail!("Refusing to overwrite {}", file_path.display());
    }

    let title = title.map_or_else(|| title_from_path(&relative), str::to_string);
    let now = Utc::now();
    let content = match collection {
        Collection::Projects => project_template(&title, now),
        Collection::Store => store_template(&title, now),
    };

    // Create parent directories
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }

    fs::write(&file_path, content).wrap_err("Failed to write file")?;

    tracing::info!(?file_path, "Created new content file");
    println!("Created: {}", file_path.display());

    Ok(file_path)
}

/// Resolve the entry's path inside its collection directory.
///
/// Names without a content extension get `.md` appended to the whole name,
/// so `tool-v1.2` becomes `tool-v1.2.md`.
fn entry_file_name(name: &Path) -> Result<PathBuf> {
    if name.as_os_str().is_empty() {
        bail!("Entry name cannot be empty");
    }
    if !name.components().all(|c| matches!(c, Component::Normal(_))) {
        bail!(
            "Entry name must be a relative path inside the collection: {}",
            name.display()
        );
    }

    let has_content_extension = name
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ContentType::from_extension)
        .is_some();
    if has_content_extension {
        return Ok(name.to_path_buf());
    }

    let mut file_name = name.as_os_str().to_owned();
    file_name.push(".md");
    Ok(PathBuf::from(file_name))
}

/// Title from a resolved entry path, which always carries a content extension.
fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .replace(['-', '_'], " ")
}

/// Double-quoted YAML scalar.
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn project_template(title: &str, now: DateTime<Utc>) -> String {
    let date = quote(&now.format("%b %d %Y").to_string());

    format!(
        r#"---
title: {title}
description: {description}
pubDate: {date}
updatedDate: {date}
heroImage: {hero}
tags: []
---

Write your content here.
"#,
        title = quote(title),
        description = quote(&format!("A short description of {title}.")),
        hero = quote(DEFAULT_HERO_IMAGE),
    )
}

fn store_template(title: &str, now: DateTime<Utc>) -> String {
    let date = quote(&now.format("%Y-%m-%d").to_string());

    format!(
        r##"---
title: {title}
description: {description}
custom_link_label: "Learn more"
custom_link: "#"
updatedDate: {date}
---

Describe the offer here.
"##,
        title = quote(title),
        description = quote(&format!("A short description of {title}.")),
    )
}
