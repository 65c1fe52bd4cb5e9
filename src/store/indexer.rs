//! Catalog indexer
//!
//! Walks the configured library paths and records every regular file in the
//! catalog, then upserts the configured contacts. Library paths may be plain
//! directories (indexed recursively) or glob patterns.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::catalog::{CatalogDb, FileRecord};
use crate::logic::file::{mime_type_for_path, DEFAULT_MIME_TYPE};
use crate::utils::{expand_home, log_debug};

/// A contact entry from the configuration file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContactSeed {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

/// What an indexing pass did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub files: usize,
    pub contacts: usize,
    pub pruned: usize,
    /// Glob entries that could not be read
    pub skipped: usize,
}

/// Turn a library path into a glob pattern
///
/// `~` is expanded; a pattern without glob metacharacters is treated as a
/// directory and searched recursively.
///
/// # Examples
/// ```
/// use mediamaster::store::indexer::expand_pattern;
///
/// assert_eq!(expand_pattern("/srv/photos"), "/srv/photos/**/*");
/// assert_eq!(expand_pattern("/srv/photos/"), "/srv/photos/**/*");
/// assert_eq!(expand_pattern("/srv/music/*.mp3"), "/srv/music/*.mp3");
/// ```
pub fn expand_pattern(pattern: &str) -> String {
    let expanded = expand_home(pattern).to_string_lossy().into_owned();
    if expanded.contains(['*', '?', '[']) {
        expanded
    } else {
        format!("{}/**/*", expanded.trim_end_matches('/'))
    }
}

/// Build a catalog record for a file, or `None` for non-files
pub fn record_for_path(path: &Path, date_added: i64) -> Option<FileRecord> {
    let metadata = std::fs::metadata(path).ok()?;
    if !metadata.is_file() {
        return None;
    }

    let display_name = path.file_name()?.to_string_lossy().into_owned();
    let mime_type = mime_type_for_path(path).unwrap_or(DEFAULT_MIME_TYPE);

    Some(FileRecord {
        path: path.to_path_buf(),
        display_name,
        size: Some(metadata.len()),
        mime_type: mime_type.to_string(),
        date_added,
    })
}

/// Index library paths and contacts into the catalog
pub fn index_library(
    catalog: &CatalogDb,
    library_paths: &[String],
    contacts: &[ContactSeed],
) -> Result<IndexSummary> {
    let mut summary = IndexSummary::default();
    let now = chrono::Utc::now().timestamp();

    for library_path in library_paths {
        let pattern = expand_pattern(library_path);
        log_debug(&format!("Indexer: scanning {}", pattern));

        let entries = glob::glob(&pattern)
            .with_context(|| format!("Invalid library path pattern: {}", library_path))?;

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log_debug(&format!("Indexer: unreadable entry: {}", e));
                    summary.skipped += 1;
                    continue;
                }
            };

            if let Some(record) = record_for_path(&path, now) {
                catalog.upsert_file(&record)?;
                summary.files += 1;
            }
        }
    }

    for contact in contacts {
        catalog.upsert_contact(contact.name.as_deref(), contact.number.as_deref())?;
        summary.contacts += 1;
    }

    summary.pruned = catalog.prune_missing_files()?;

    log_debug(&format!("Indexer: {:?}", summary));
    Ok(summary)
}
