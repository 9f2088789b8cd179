//! Validation contract tests for the `projects` and `store` schemas.

use std::path::Path;

use folio_core::{
    Collection, RawRecord, RawValue, Record, ValueShape, ViolationKind, frontmatter, validate,
};

fn record(yaml: &str) -> RawRecord {
    let content = format!("---\n{yaml}\n---\n");
    let (raw, _) = frontmatter::parse_frontmatter(&content, Path::new("test.md")).expect("parse");
    raw
}

const REQUIRED_PROJECT: &str = r#"
title: "Portfolio"
description: "Personal site"
pubDate: "2024-01-15"
updatedDate: "2024-02-01"
"#;

#[test]
fn test_validation_is_deterministic() {
    let raw = record("title: x\ntags: [a, a]");
    let first = validate("projects", &raw).unwrap_err().to_string();
    let second = validate("projects", &raw).unwrap_err().to_string();
    assert_eq!(first, second);

    let raw = record(REQUIRED_PROJECT);
    assert_eq!(
        validate("projects", &raw).expect("valid"),
        validate("projects", &raw).expect("valid")
    );
}

#[test]
fn test_required_only_round_trip() {
    let raw = record(REQUIRED_PROJECT);
    let Record::Project(project) = validate("projects", &raw).expect("valid") else {
        panic!("expected a project record");
    };

    assert_eq!(project.title, "Portfolio");
    assert_eq!(project.description, "Personal site");
    assert_eq!(project.pub_date.date_naive().to_string(), "2024-01-15");
    assert_eq!(project.updated_date.date_naive().to_string(), "2024-02-01");
}

#[test]
fn test_optional_fields_are_omitted() {
    let raw = record(REQUIRED_PROJECT);
    let record = validate("projects", &raw).expect("valid");

    let serialized = toml::to_string(&record).expect("serialize");
    for key in ["heroImage", "badge", "tags"] {
        assert!(!serialized.contains(key), "{key} should be omitted");
    }
    for key in ["title", "description", "pubDate", "updatedDate"] {
        assert!(serialized.contains(key), "{key} should be present");
    }
}

#[test]
fn test_unknown_fields_are_ignored() {
    let raw = record(&format!("{REQUIRED_PROJECT}\nlayout: wide\ndraft: true"));
    assert!(validate("projects", &raw).is_ok());
}

#[test]
fn test_required_field_absence() {
    let raw = record("description: d\npubDate: 2024-01-15\nupdatedDate: 2024-01-15");
    let err = validate("projects", &raw).unwrap_err();
    let failure = err.as_validation().expect("validation failure");

    assert_eq!(failure.violations.len(), 1);
    assert_eq!(failure.violations[0].field, "title");
    assert_eq!(failure.violations[0].kind, ViolationKind::Missing);
}

#[test]
fn test_tag_uniqueness() {
    let dup = record(&format!("{REQUIRED_PROJECT}\ntags: [a, b, a]"));
    let err = validate("projects", &dup).unwrap_err();
    let failure = err.as_validation().expect("validation failure");
    assert_eq!(failure.violations.len(), 1);
    assert!(failure.violations[0].is_duplicate_tags());
    assert!(err.to_string().contains("tags must be unique"));

    let unique = record(&format!("{REQUIRED_PROJECT}\ntags: [a, b]"));
    assert!(validate("projects", &unique).is_ok());

    let absent = record(REQUIRED_PROJECT);
    assert!(validate("projects", &absent).is_ok());
}

#[test]
fn test_tags_type_error_is_distinct_from_uniqueness() {
    let raw = record(&format!("{REQUIRED_PROJECT}\ntags: rust"));
    let err = validate("projects", &raw).unwrap_err();
    let violation = &err.as_validation().expect("validation failure").violations[0];

    assert!(!violation.is_duplicate_tags());
    assert_eq!(
        violation.kind,
        ViolationKind::InvalidType {
            expected: "sequence of strings",
            found: ValueShape::String,
        }
    );
}

#[test]
fn test_date_coercion() {
    let short = record(REQUIRED_PROJECT);
    let long = record(&REQUIRED_PROJECT.replace("\"2024-01-15\"", "\"2024-01-15T00:00:00Z\""));
    let bad = record(&REQUIRED_PROJECT.replace("\"2024-01-15\"", "\"not-a-date\""));

    let short = validate("projects", &short).expect("valid");
    let long = validate("projects", &long).expect("valid");
    assert_eq!(
        short.as_project().map(|p| p.pub_date),
        long.as_project().map(|p| p.pub_date)
    );

    let err = validate("projects", &bad).unwrap_err();
    let failure = err.as_validation().expect("validation failure");
    assert_eq!(failure.violations.len(), 1);
    assert_eq!(failure.violations[0].field, "pubDate");
    assert_eq!(
        failure.violations[0].kind,
        ViolationKind::InvalidDate {
            found: ValueShape::String
        }
    );
}

#[test]
fn test_epoch_millis_date() {
    let mut raw = record(REQUIRED_PROJECT);
    raw.insert("pubDate".into(), RawValue::Integer(1_705_276_800_000));

    let record = validate("projects", &raw).expect("valid");
    assert_eq!(
        record.as_project().map(|p| p.pub_date.date_naive().to_string()),
        Some("2024-01-15".to_string())
    );
}

#[test]
fn test_multi_failure_collection() {
    let raw = record("pubDate: 2024-01-15\nupdatedDate: 2024-01-15\ntags: [x, y, x]");
    let err = validate("projects", &raw).unwrap_err();
    let failure = err.as_validation().expect("validation failure");

    assert_eq!(failure.violations.len(), 3);
    assert!(failure.has_field("title"));
    assert!(failure.has_field("description"));
    assert_eq!(
        failure
            .violations
            .iter()
            .filter(|v| v.is_duplicate_tags())
            .count(),
        1
    );
}

#[test]
fn test_unknown_collection() {
    let raw = record(REQUIRED_PROJECT);
    let err = validate("unknown", &raw).unwrap_err();

    assert!(err.is_config());
    assert!(err.as_validation().is_none());
}

#[test]
fn test_store_record() {
    let raw = record(
        r#"
title: "Astrofy template"
description: "A portfolio template"
custom_link_label: "See on GitHub"
custom_link: "https://github.com"
updatedDate: "Mar 22 2024"
pricing: "$10"
oldPricing: "$25.5"
badge: "Sale"
checkoutUrl: "https://shop.example.com"
heroImage: "/store.webp"
"#,
    );

    let record = validate("store", &raw).expect("valid store record");
    assert_eq!(record.collection(), Collection::Store);
    let store = record.as_store().expect("store");
    assert_eq!(store.old_pricing.as_deref(), Some("$25.5"));
    assert_eq!(store.checkout_url.as_deref(), Some("https://shop.example.com"));
}

#[test]
fn test_store_rejects_numeric_price() {
    let raw = record(
        "title: t\ndescription: d\ncustom_link_label: ''\nupdatedDate: 2024-01-15\npricing: 10",
    );
    let err = validate("store", &raw).unwrap_err();
    let failure = err.as_validation().expect("validation failure");

    let kinds: Vec<_> = failure.violations.iter().map(|v| &v.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &ViolationKind::Empty,
            &ViolationKind::InvalidType {
                expected: "string",
                found: ValueShape::Integer,
            },
        ]
    );
}
