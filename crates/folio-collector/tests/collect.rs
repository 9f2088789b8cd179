//! End-to-end collection tests over a temporary content tree.

use std::{fs, path::Path};

use chrono::Datelike;
use folio_collector::{ContentCollector, ValidationReport};
use folio_core::{Collection, Config};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, content).expect("write");
}

fn project(title: &str, pub_date: &str, tags: &str) -> String {
    format!(
        r#"---
title: "{title}"
description: "About {title}"
pubDate: "{pub_date}"
updatedDate: "{pub_date}"
heroImage: "/post_img.webp"
tags: {tags}
---

# {title}
"#
    )
}

const STORE_ITEM: &str = r#"+++
title = "Astrofy"
description = "Portfolio template"
custom_link_label = "Get it"
updatedDate = 2024-05-01
pricing = "$0"
+++

Free forever.
"#;

fn sample_site(root: &Path) {
    write(root, "projects/alpha.md", &project("Alpha", "Jan 10 2024", "[\"Rust\"]"));
    write(root, "projects/beta.md", &project("Beta", "Mar 02 2024", "[\"Rust\", \"Python\"]"));
    write(root, "projects/nested/gamma/index.mdx", &project("Gamma", "2023-12-01", "[]"));
    write(root, "projects/dupe.md", &project("Dupe", "2024-01-01", "[\"a\", \"a\"]"));
    write(root, "projects/empty.md", "No front-matter here.");
    write(root, "projects/cover.png", "not content");
    write(root, "store/astrofy.md", STORE_ITEM);
}

#[test]
fn test_collect_sample_site() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());

    let set = ContentCollector::new(Config::default(), dir.path())
        .collect()
        .expect("collect");

    assert_eq!(set.scanned, 6);
    assert_eq!(set.accepted(), 4);
    assert_eq!(set.failures.len(), 2);

    let ids: Vec<_> = set
        .get(Collection::Projects)
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(ids, vec!["alpha", "beta", "nested/gamma"]);

    let store = set.get(Collection::Store);
    assert_eq!(store.len(), 1);
    assert_eq!(store[0].record.updated_date().year(), 2024);
    assert_eq!(store[0].body, "Free forever.\n");
}

#[test]
fn test_failures_do_not_block_siblings() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());

    let set = ContentCollector::new(Config::default(), dir.path())
        .collect()
        .expect("collect");

    let failed: Vec<_> = set
        .failures
        .iter()
        .map(|f| f.path.file_name().expect("name").to_string_lossy().to_string())
        .collect();
    assert_eq!(failed, vec!["dupe.md", "empty.md"]);

    let dupe = set.failures[0]
        .error
        .as_validation()
        .expect("validation failure");
    assert!(dupe.violations.iter().any(|v| v.is_duplicate_tags()));

    let empty = set.failures[1]
        .error
        .as_validation()
        .expect("validation failure");
    assert_eq!(empty.violations.len(), 4);

    let report = ValidationReport::from_set(&set);
    assert!(!report.ok());
    assert_eq!(report.rejected, 2);
}

#[test]
fn test_projects_by_date_and_tags() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());

    let set = ContentCollector::new(Config::default(), dir.path())
        .collect()
        .expect("collect");

    let titles: Vec<_> = set
        .projects_by_date()
        .iter()
        .map(|e| e.record.title())
        .collect();
    assert_eq!(titles, vec!["Beta", "Alpha", "Gamma"]);

    let tags = set.tag_index();
    assert_eq!(tags["Rust"], vec!["alpha", "beta"]);
    assert_eq!(tags["Python"], vec!["beta"]);
}

#[test]
fn test_slugs_follow_site_flag() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());

    let set = ContentCollector::new(Config::default(), dir.path())
        .collect()
        .expect("collect");
    assert_eq!(set.get(Collection::Projects)[2].url_path(), "/projects/gamma");

    let mut config = Config::default();
    config.site.generate_slug_from_title = false;
    let set = ContentCollector::new(config, dir.path())
        .collect()
        .expect("collect");
    assert_eq!(
        set.get(Collection::Projects)[2].url_path(),
        "/projects/nested/gamma"
    );
}

#[test]
fn test_duplicate_slugs_reported() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write(dir.path(), "projects/one.md", &project("Same", "2024-01-01", "[]"));
    write(dir.path(), "projects/two.md", &project("Same", "2024-02-01", "[]"));

    let set = ContentCollector::new(Config::default(), dir.path())
        .collect()
        .expect("collect");

    let duplicates = set.duplicate_slugs();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].0, Collection::Projects);
    assert_eq!(duplicates[0].1, "same");
    assert_eq!(duplicates[0].2.len(), 2);
}

#[test]
fn test_missing_collection_directory() {
    let dir = tempfile::tempdir().expect("create temp dir");
    write(dir.path(), "projects/alpha.md", &project("Alpha", "2024-01-10", "[]"));

    let set = ContentCollector::new(Config::default(), dir.path())
        .collect()
        .expect("collect");

    assert_eq!(set.missing, vec![Collection::Store]);
    assert!(set.get(Collection::Store).is_empty());
    assert!(set.is_clean());
}

#[test]
fn test_only_configured_collections_are_read() {
    let dir = tempfile::tempdir().expect("create temp dir");
    sample_site(dir.path());

    let mut config = Config::default();
    config.content.collections = vec!["store".to_string()];
    let set = ContentCollector::new(config, dir.path())
        .collect()
        .expect("collect");

    assert_eq!(set.scanned, 1);
    assert!(set.get(Collection::Projects).is_empty());
}
