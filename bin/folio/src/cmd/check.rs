//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, bail};
use folio_collector::{CollectionSet, ContentCollector, ValidationReport};
use folio_core::{Collection, Config};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub report: Option<ValidationReport>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates every content file of the configured collections.
pub fn run(config: &Config, content_dir: &Path, strict: bool) -> Result<()> {
    tracing::info!(?content_dir, strict, "Checking content");

    println!("Checking content in {}...", content_dir.display());
    let result = check_content(config, content_dir)?;

    if let Some(report) = &result.report {
        println!();
        println!("Summary:");
        println!("  Scanned:  {}", report.scanned);
        println!("  Accepted: {}", report.accepted);
        println!("  Rejected: {}", report.rejected);
    }
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    // Determine exit status
    if result.has_errors() {
        bail!("Validation failed with {} rejected file(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Collect and validate content, classifying problems as errors or warnings.
pub fn check_content(config: &Config, content_dir: &Path) -> Result<ValidationResult> {
    let set = ContentCollector::new(config.clone(), content_dir)
        .collect()
        .wrap_err("Content collection failed")?;

    let mut result = ValidationResult::default();

    for failure in &set.failures {
        result.add_error(failure.format_human_readable());
    }

    for collection in &set.missing {
        result.add_warning(format!(
            "Collection directory missing: {}",
            content_dir.join(collection.name()).display()
        ));
    }

    check_entries(&set, &mut result);
    result.report = Some(ValidationReport::from_set(&set));

    Ok(result)
}

/// Non-fatal checks on accepted entries.
fn check_entries(set: &CollectionSet, result: &mut ValidationResult) {
    for (collection, slug, paths) in set.duplicate_slugs() {
        let files = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        result.add_warning(format!(
            "Duplicate slug `{slug}` in {collection}: {files}"
        ));
    }

    for entry in set.get(Collection::Projects) {
        if let Some(project) = entry.record.as_project()
            && project.updated_date < project.pub_date
        {
            result.add_warning(format!(
                "{}: updatedDate is earlier than pubDate",
                entry.source_path.display()
            ));
        }
    }

    for entry in set.get(Collection::Store) {
        if let Some(item) = entry.record.as_store()
            && item.link().is_none()
        {
            result.add_warning(format!(
                "{}: store entry has neither checkoutUrl nor custom_link",
                entry.source_path.display()
            ));
        }
    }
}
