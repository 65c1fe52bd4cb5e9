//! Content store
//!
//! The indexed catalog of media files and contacts, queried declaratively
//! with a collection, a column projection, an optional filter with bound
//! arguments, and a sort order.
//!
//! - cursor: iterable query results
//! - catalog: SQLite-backed store
//! - indexer: populates the catalog from library paths and configured contacts

pub mod catalog;
pub mod cursor;
pub mod indexer;

use std::path::PathBuf;

use crate::model::types::ContentUri;

pub use catalog::CatalogDb;
pub use cursor::{Cursor, CursorRow};

/// Column names understood by the catalog
pub mod columns {
    pub const ID: &str = "_id";
    pub const DATA: &str = "_data";
    pub const DISPLAY_NAME: &str = "_display_name";
    pub const SIZE: &str = "_size";
    pub const MIME_TYPE: &str = "mime_type";
    pub const DATE_ADDED: &str = "date_added";

    pub const CONTACT_DISPLAY_NAME: &str = "display_name";
    pub const CONTACT_NUMBER: &str = "number";

    pub(crate) const FILE_COLUMNS: &[&str] = &[ID, DATA, DISPLAY_NAME, SIZE, MIME_TYPE, DATE_ADDED];
    pub(crate) const CONTACT_COLUMNS: &[&str] = &[ID, CONTACT_DISPLAY_NAME, CONTACT_NUMBER];
}

/// Queryable collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Images,
    Video,
    Audio,
    /// Every catalogued file regardless of type
    Files,
    ContactPhones,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Images,
        Collection::Video,
        Collection::Audio,
        Collection::Files,
        Collection::ContactPhones,
    ];

    /// Base uri; item locators are `<uri>/<id>`
    pub fn uri(&self) -> &'static str {
        match self {
            Collection::Images => "content://media/external/images/media",
            Collection::Video => "content://media/external/video/media",
            Collection::Audio => "content://media/external/audio/media",
            Collection::Files => "content://media/external/file",
            Collection::ContactPhones => "content://com.android.contacts/data/phones",
        }
    }

    /// Collection an item locator belongs to
    pub fn for_uri(uri: &ContentUri) -> Option<Collection> {
        let (base, id) = uri.as_str().rsplit_once('/')?;
        id.parse::<i64>().ok()?;
        Collection::ALL.into_iter().find(|c| c.uri() == base)
    }

    /// Columns that may appear in a projection or sort order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Collection::ContactPhones => columns::CONTACT_COLUMNS,
            _ => columns::FILE_COLUMNS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: &'static str,
    pub direction: SortDirection,
    /// Compare text case-insensitively (`COLLATE NOCASE`)
    pub ignore_case: bool,
}

impl SortOrder {
    pub fn ascending(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
            ignore_case: false,
        }
    }

    pub fn descending(column: &'static str) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
            ignore_case: false,
        }
    }

    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }
}

/// A declarative content query
///
/// `selection` is a filter expression over the collection's columns with
/// `?` placeholders bound positionally from `selection_args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub collection: Collection,
    pub projection: Vec<&'static str>,
    pub selection: Option<String>,
    pub selection_args: Vec<String>,
    pub sort_order: Option<SortOrder>,
}

impl ContentQuery {
    pub fn new(collection: Collection, projection: &[&'static str]) -> Self {
        Self {
            collection,
            projection: projection.to_vec(),
            selection: None,
            selection_args: Vec::new(),
            sort_order: None,
        }
    }

    pub fn selection(mut self, selection: impl Into<String>, args: Vec<String>) -> Self {
        self.selection = Some(selection.into());
        self.selection_args = args;
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }
}

/// The content store the loader queries
pub trait ContentStore: Send + Sync {
    /// Run a query; `None` means the store is unavailable (not an error)
    fn query(&self, query: &ContentQuery) -> Option<Cursor>;

    /// Map an item locator to a readable file
    fn resolve_path(&self, uri: &ContentUri) -> Option<PathBuf>;
}

/// Store used when the catalog can't be opened; every query yields no cursor
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl ContentStore for UnavailableStore {
    fn query(&self, _query: &ContentQuery) -> Option<Cursor> {
        None
    }

    fn resolve_path(&self, _uri: &ContentUri) -> Option<PathBuf> {
        None
    }
}
