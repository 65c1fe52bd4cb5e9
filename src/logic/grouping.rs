//! Row grouping logic
//!
//! Pure functions that pack loaded entries into list rows.

use crate::model::types::{MediaCategory, MediaEntry, MediaRow};

/// Number of grid columns for image and video rows
pub const GRID_COLUMNS: usize = 4;

/// Maximum entries per row for a category
///
/// Images and videos share the 4-column grid; contacts, audio and documents
/// always render one entry per row.
pub fn row_capacity(category: MediaCategory) -> usize {
    if category.is_grid() {
        GRID_COLUMNS
    } else {
        1
    }
}

/// Pack entries into rows of `capacity`, preserving input order
///
/// Every row is full except possibly the last one. A capacity of zero is
/// treated as one.
///
/// # Examples
/// ```
/// use mediamaster::logic::grouping::group_into_rows;
/// use mediamaster::{ContentUri, MediaEntry};
///
/// let entries = (0..10).map(|i| MediaEntry::Image {
///     uri: ContentUri::with_appended_id("content://media/external/images/media", i),
/// });
/// let rows = group_into_rows(entries, 4);
/// let sizes: Vec<usize> = rows.iter().map(|r| r.len()).collect();
/// assert_eq!(sizes, vec![4, 4, 2]);
/// ```
pub fn group_into_rows<I>(entries: I, capacity: usize) -> Vec<MediaRow>
where
    I: IntoIterator<Item = MediaEntry>,
{
    let capacity = capacity.max(1);
    let mut rows = Vec::new();
    let mut pending = Vec::with_capacity(capacity);

    for entry in entries {
        pending.push(entry);
        if pending.len() == capacity {
            rows.push(MediaRow::new(std::mem::replace(
                &mut pending,
                Vec::with_capacity(capacity),
            )));
        }
    }

    if !pending.is_empty() {
        rows.push(MediaRow::new(pending));
    }

    rows
}

/// Group entries using the row capacity of `category`
pub fn group_for_category<I>(entries: I, category: MediaCategory) -> Vec<MediaRow>
where
    I: IntoIterator<Item = MediaEntry>,
{
    group_into_rows(entries, row_capacity(category))
}
