//! Content collection and validation.
//!
//! Walks `<content>/<collection>/` for every configured collection and
//! validates each file against that collection's schema. A rejected file is
//! recorded as a failure and never stops its siblings.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use folio_core::{Collection, Config, ContentPath, ContentType, CoreError, Entry};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Content collection errors. These abort the whole run; per-file problems
/// end up in [`CollectionSet::failures`] instead.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid configuration, such as an unknown collection name.
    #[error(transparent)]
    Config(#[from] CoreError),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// A content file that was not accepted into the build.
#[derive(Debug)]
pub struct EntryFailure {
    /// Source file path.
    pub path: PathBuf,

    /// Collection the file is stored under.
    pub collection: Collection,

    pub error: CoreError,
}

/// Collected and validated site content.
#[derive(Debug, Default)]
pub struct CollectionSet {
    /// Accepted entries per collection, sorted by id.
    pub entries: BTreeMap<Collection, Vec<Entry>>,

    /// Rejected files, sorted by path.
    pub failures: Vec<EntryFailure>,

    /// Configured collections whose directory does not exist.
    pub missing: Vec<Collection>,

    /// Number of content files read.
    pub scanned: usize,
}

impl CollectionSet {
    /// Accepted entries of one collection.
    pub fn get(&self, collection: Collection) -> &[Entry] {
        self.entries
            .get(&collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of accepted entries across all collections.
    pub fn accepted(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether every scanned file was accepted.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Projects sorted by publication date, newest first; ties by title.
    pub fn projects_by_date(&self) -> Vec<&Entry> {
        let mut projects: Vec<_> = self
            .get(Collection::Projects)
            .iter()
            .filter_map(|e| e.record.as_project().map(|p| (e, p)))
            .collect();

        projects.sort_by(|(_, a), (_, b)| {
            b.pub_date
                .cmp(&a.pub_date)
                .then_with(|| a.title.cmp(&b.title))
        });
        projects.into_iter().map(|(e, _)| e).collect()
    }

    /// Slugs shared by more than one entry of the same collection, with the
    /// files that produce them.
    pub fn duplicate_slugs(&self) -> Vec<(Collection, String, Vec<PathBuf>)> {
        let mut duplicates = Vec::new();
        for (collection, entries) in &self.entries {
            let mut by_slug: BTreeMap<&str, Vec<PathBuf>> = BTreeMap::new();
            for entry in entries {
                by_slug
                    .entry(entry.slug.as_str())
                    .or_default()
                    .push(entry.source_path.clone());
            }
            for (slug, paths) in by_slug {
                if paths.len() > 1 {
                    duplicates.push((*collection, slug.to_string(), paths));
                }
            }
        }
        duplicates
    }

    /// Tag to project ids.
    pub fn tag_index(&self) -> HashMap<&str, Vec<&str>> {
        let mut index: HashMap<&str, Vec<&str>> = HashMap::new();
        for entry in self.get(Collection::Projects) {
            let tags = entry.record.as_project().and_then(|p| p.tags.as_ref());
            for tag in tags.into_iter().flatten() {
                index.entry(tag.as_str()).or_default().push(entry.id.as_str());
            }
        }
        index
    }
}

/// Content collector that walks collection directories and validates files.
#[derive(Debug)]
pub struct ContentCollector {
    config: Config,
    content_dir: PathBuf,
}

impl ContentCollector {
    /// Create a new content collector.
    #[must_use]
    pub fn new(config: Config, content_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
        }
    }

    /// Collect and validate all content of the configured collections.
    pub fn collect(&self) -> Result<CollectionSet> {
        info!(dir = %self.content_dir.display(), "collecting content");

        let collections = self.config.content.collections()?;
        let mut set = CollectionSet::default();

        for collection in collections {
            let dir = self.content_dir.join(collection.name());
            if !dir.is_dir() {
                warn!(%collection, dir = %dir.display(), "collection directory not found");
                set.missing.push(collection);
                set.entries.entry(collection).or_default();
                continue;
            }

            let files = find_content_files(&dir)?;
            debug!(%collection, count = files.len(), "found content files");
            set.scanned += files.len();

            // Validate files in parallel
            let results: Vec<_> = files
                .par_iter()
                .map(|path| (path, self.parse_file(&dir, path, collection)))
                .collect();

            let mut entries = Vec::with_capacity(results.len());
            for (path, result) in results {
                match result {
                    Ok(entry) => entries.push(entry),
                    Err(error) => {
                        warn!(path = %path.display(), %error, "rejected content file");
                        set.failures.push(EntryFailure {
                            path: path.clone(),
                            collection,
                            error,
                        });
                    }
                }
            }

            entries.sort_by(|a, b| a.id.cmp(&b.id));
            set.entries.insert(collection, entries);
        }

        set.failures.sort_by(|a, b| a.path.cmp(&b.path));

        info!(
            scanned = set.scanned,
            accepted = set.accepted(),
            rejected = set.failures.len(),
            "content collection complete"
        );

        Ok(set)
    }

    /// Parse and validate a single content file.
    fn parse_file(
        &self,
        collection_dir: &Path,
        path: &Path,
        collection: Collection,
    ) -> std::result::Result<Entry, CoreError> {
        debug!(path = %path.display(), "parsing file");

        let source = fs::read_to_string(path)?;

        let relative_path = path.strip_prefix(collection_dir).unwrap_or(path);
        let content_path = ContentPath::from_path(relative_path, collection)
            .ok_or_else(|| CoreError::parse(path, "cannot derive an entry id from this path"))?;

        let mut entry = Entry::parse(&source, &content_path, &self.config.site)?;
        entry.source_path = path.to_path_buf();
        Ok(entry)
    }
}

/// Find content files under a collection directory, skipping hidden entries.
fn find_content_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if let Some(ext) = path.extension()
            && ContentType::from_extension(&ext.to_string_lossy()).is_some()
        {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}
