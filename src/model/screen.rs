//! Media Screen Model
//!
//! State of one open media screen: its category, the permission flow, the
//! loaded rows and the list viewport. A screen runs at most one content load
//! during its lifetime.

use std::time::Instant;

use crate::adapter::MediaAdapter;
use crate::logic::navigation::{next_selection, offset_selection, prev_selection, scroll_offset_for};
use crate::model::types::{MediaCategory, MediaEntry, MediaRow};
use crate::permissions::{PermissionCoordinator, PermissionState};

#[derive(Clone, Debug)]
pub struct ScreenModel {
    /// Distinguishes this screen instance from earlier ones of the same category
    pub id: u64,

    pub category: MediaCategory,

    pub coordinator: PermissionCoordinator,

    pub adapter: MediaAdapter,

    /// Selected row position
    pub selected: Option<usize>,

    /// First visible row position
    pub scroll_offset: usize,

    /// Set while the content query is running ("Please wait" indicator)
    pub loading_since: Option<Instant>,

    /// Whether the one load for this screen has been started
    pub load_started: bool,
}

impl ScreenModel {
    pub fn new(id: u64, category: MediaCategory, api_level: u32) -> Self {
        Self {
            id,
            category,
            coordinator: PermissionCoordinator::new(category, api_level),
            adapter: MediaAdapter::default(),
            selected: None,
            scroll_offset: 0,
            loading_since: None,
            load_started: false,
        }
    }

    pub fn permission_state(&self) -> PermissionState {
        self.coordinator.state()
    }

    pub fn is_loading(&self) -> bool {
        self.loading_since.is_some()
    }

    /// Mark the load as started; false if this screen already loaded once
    pub fn begin_load(&mut self) -> bool {
        if self.load_started {
            return false;
        }
        self.load_started = true;
        self.loading_since = Some(Instant::now());
        true
    }

    /// Install the rows of the finished load and dismiss the indicator
    pub fn finish_load(&mut self, rows: Vec<MediaRow>) {
        self.loading_since = None;
        self.selected = if rows.is_empty() { None } else { Some(0) };
        self.scroll_offset = 0;
        self.adapter.set_rows(rows);
    }

    /// Start the permission flow over with a fresh coordinator
    pub fn restart_permission_flow(&mut self, api_level: u32) {
        self.coordinator = PermissionCoordinator::new(self.category, api_level);
    }

    pub fn row_count(&self) -> usize {
        self.adapter.item_count()
    }

    /// Total entries across all rows
    pub fn entry_count(&self) -> usize {
        self.adapter.rows().iter().map(MediaRow::len).sum()
    }

    /// First entry of the selected row
    pub fn selected_entry(&self) -> Option<&MediaEntry> {
        self.selected
            .and_then(|i| self.adapter.row(i))
            .and_then(|row| row.entries.first())
    }

    pub fn select_next(&mut self) {
        self.selected = next_selection(self.selected, self.row_count());
    }

    pub fn select_prev(&mut self) {
        self.selected = prev_selection(self.selected, self.row_count());
    }

    pub fn select_offset(&mut self, delta: isize) {
        self.selected = offset_selection(self.selected, delta, self.row_count());
    }

    pub fn select_first(&mut self) {
        if self.row_count() > 0 {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        self.selected = self.row_count().checked_sub(1);
    }

    /// Keep the selection inside a viewport of `visible_rows` rows
    pub fn update_scroll(&mut self, visible_rows: usize) {
        self.scroll_offset =
            scroll_offset_for(self.scroll_offset, self.selected, visible_rows, self.row_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::grouping::group_for_category;
    use crate::model::types::ContentUri;

    fn image_rows(n: i64) -> Vec<MediaRow> {
        group_for_category(
            (0..n).map(|id| MediaEntry::Image {
                uri: ContentUri::with_appended_id("content://media/external/images/media", id),
            }),
            MediaCategory::Image,
        )
    }

    #[test]
    fn test_screen_loads_once() {
        let mut screen = ScreenModel::new(1, MediaCategory::Image, 34);
        assert!(screen.begin_load());
        assert!(screen.is_loading());
        assert!(!screen.begin_load());

        screen.finish_load(image_rows(10));
        assert!(!screen.is_loading());
        assert!(!screen.begin_load());
        assert_eq!(screen.row_count(), 3);
        assert_eq!(screen.entry_count(), 10);
    }

    #[test]
    fn test_empty_load_dismisses_indicator() {
        let mut screen = ScreenModel::new(1, MediaCategory::Audio, 34);
        screen.begin_load();
        screen.finish_load(Vec::new());
        assert!(!screen.is_loading());
        assert_eq!(screen.selected, None);
        assert!(screen.selected_entry().is_none());
    }

    #[test]
    fn test_selection_and_scroll() {
        let mut screen = ScreenModel::new(1, MediaCategory::Image, 34);
        screen.finish_load(image_rows(40));
        assert_eq!(screen.selected, Some(0));

        screen.select_last();
        assert_eq!(screen.selected, Some(9));
        screen.update_scroll(4);
        assert_eq!(screen.scroll_offset, 6);

        screen.select_next();
        assert_eq!(screen.selected, Some(0));
        screen.update_scroll(4);
        assert_eq!(screen.scroll_offset, 0);

        screen.select_offset(100);
        assert_eq!(screen.selected, Some(9));
    }

    #[test]
    fn test_restart_permission_flow_resets_coordinator() {
        let mut screen = ScreenModel::new(1, MediaCategory::Contact, 34);
        screen.restart_permission_flow(34);
        assert_eq!(screen.permission_state(), PermissionState::Unchecked);
        assert_eq!(screen.coordinator.denials(), 0);
    }
}
