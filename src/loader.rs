//! Content loader
//!
//! Builds the query for a category, walks the resulting cursor once, and
//! packs the entries into list rows. Every call issues a fresh query.
//!
//! An unavailable store (no cursor) or a cursor missing a projected column
//! produces zero rows rather than an error.

use anyhow::Result;

use crate::logic::grouping::group_for_category;
use crate::model::types::{ContentUri, MediaCategory, MediaEntry, MediaRow};
use crate::store::{columns, Collection, ContentQuery, ContentStore, Cursor, SortOrder};
use crate::utils::log_debug;

/// MIME types the audio screen lists
pub const AUDIO_MIME_TYPES: [&str; 4] = ["audio/mpeg", "audio/x-wav", "audio/ogg", "audio/mp4"];

/// Collection a category is queried from
pub fn collection_for(category: MediaCategory) -> Collection {
    match category {
        MediaCategory::Image => Collection::Images,
        MediaCategory::Video => Collection::Video,
        MediaCategory::Audio => Collection::Audio,
        MediaCategory::Document => Collection::Files,
        MediaCategory::Contact => Collection::ContactPhones,
    }
}

/// The query issued for a category
///
/// Media is sorted newest-first by `date_added`; contacts alphabetically by
/// display name, ignoring case. Audio is restricted to `AUDIO_MIME_TYPES`.
pub fn query_for(category: MediaCategory) -> ContentQuery {
    let collection = collection_for(category);
    match category {
        MediaCategory::Image | MediaCategory::Video => {
            ContentQuery::new(collection, &[columns::ID])
                .sort_order(SortOrder::descending(columns::DATE_ADDED))
        }
        MediaCategory::Audio => {
            let placeholders = vec!["?"; AUDIO_MIME_TYPES.len()].join(", ");
            ContentQuery::new(
                collection,
                &[columns::ID, columns::DISPLAY_NAME, columns::SIZE, columns::MIME_TYPE],
            )
            .selection(
                format!("{} IN ({})", columns::MIME_TYPE, placeholders),
                AUDIO_MIME_TYPES.iter().map(|m| m.to_string()).collect(),
            )
            .sort_order(SortOrder::descending(columns::DATE_ADDED))
        }
        MediaCategory::Document => {
            ContentQuery::new(collection, &[columns::ID, columns::DISPLAY_NAME, columns::SIZE])
                .sort_order(SortOrder::descending(columns::DATE_ADDED))
        }
        MediaCategory::Contact => ContentQuery::new(
            collection,
            &[columns::ID, columns::CONTACT_DISPLAY_NAME, columns::CONTACT_NUMBER],
        )
        .sort_order(SortOrder::ascending(columns::CONTACT_DISPLAY_NAME).ignoring_case()),
    }
}

pub struct ContentLoader<'a> {
    store: &'a dyn ContentStore,
}

impl<'a> ContentLoader<'a> {
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self { store }
    }

    /// Query the store and return entries in query order
    pub fn entries(&self, category: MediaCategory) -> Vec<MediaEntry> {
        let query = query_for(category);
        let Some(cursor) = self.store.query(&query) else {
            log_debug(&format!("Loader: no cursor for {}", category));
            return Vec::new();
        };

        match read_entries(category, query.collection, cursor) {
            Ok(entries) => entries,
            Err(e) => {
                log_debug(&format!("Loader: bad cursor for {}: {}", category, e));
                Vec::new()
            }
        }
    }

    /// Query the store and group the entries into rows
    pub fn load(&self, category: MediaCategory) -> Vec<MediaRow> {
        let entries = self.entries(category);
        let count = entries.len();
        let rows = group_for_category(entries, category);
        log_debug(&format!(
            "Loader: {} -> {} entries in {} rows",
            category,
            count,
            rows.len()
        ));
        rows
    }
}

/// `date_added` of one catalogued item, for the status bar
pub fn date_added(store: &dyn ContentStore, uri: &ContentUri) -> Option<i64> {
    let collection = Collection::for_uri(uri)?;
    if collection == Collection::ContactPhones {
        return None;
    }
    let id = uri.id()?;

    let query = ContentQuery::new(collection, &[columns::DATE_ADDED])
        .selection(format!("{} = ?", columns::ID), vec![id.to_string()]);
    let mut cursor = store.query(&query)?;
    let column = cursor.column_index(columns::DATE_ADDED)?;
    cursor.next()?.get_i64(column)
}

fn read_entries(
    category: MediaCategory,
    collection: Collection,
    cursor: Cursor,
) -> Result<Vec<MediaEntry>> {
    let base = collection.uri();
    let id_col = cursor.column_index_or_err(columns::ID)?;

    let entries = match category {
        MediaCategory::Image => cursor
            .filter_map(|row| row.get_i64(id_col))
            .map(|id| MediaEntry::Image {
                uri: ContentUri::with_appended_id(base, id),
            })
            .collect(),
        MediaCategory::Video => cursor
            .filter_map(|row| row.get_i64(id_col))
            .map(|id| MediaEntry::Video {
                uri: ContentUri::with_appended_id(base, id),
            })
            .collect(),
        MediaCategory::Audio | MediaCategory::Document => {
            let name_col = cursor.column_index_or_err(columns::DISPLAY_NAME)?;
            let size_col = cursor.column_index_or_err(columns::SIZE)?;
            cursor
                .filter_map(|row| {
                    let uri = ContentUri::with_appended_id(base, row.get_i64(id_col)?);
                    let display_name = row.get_string(name_col);
                    let size = row.get_u64(size_col);
                    Some(if category == MediaCategory::Audio {
                        MediaEntry::Audio {
                            uri,
                            display_name,
                            size,
                        }
                    } else {
                        MediaEntry::Document {
                            uri,
                            display_name,
                            size,
                        }
                    })
                })
                .collect()
        }
        MediaCategory::Contact => {
            let name_col = cursor.column_index_or_err(columns::CONTACT_DISPLAY_NAME)?;
            let number_col = cursor.column_index_or_err(columns::CONTACT_NUMBER)?;
            cursor
                .map(|row| MediaEntry::Contact {
                    name: row.get_string(name_col),
                    number: row.get_string(number_col),
                })
                .collect()
        }
    };

    Ok(entries)
}
