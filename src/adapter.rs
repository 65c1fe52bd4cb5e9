//! List renderer
//!
//! A position-indexed adapter over the loaded rows plus a recycler that
//! keeps view holders attached to the visible positions. Holders that
//! scroll out of view go to a scrap pool per view type and are re-bound to
//! new positions, so binding must overwrite everything a previous row left
//! behind.
//!
//! Two templates exist: a 4-slot grid for image/video rows and a single
//! label row (name line, secondary line, icon) for contacts, audio and
//! documents.

use std::collections::HashMap;
use std::ops::Range;

use crate::logic::formatting::format_file_size;
use crate::logic::grouping::GRID_COLUMNS;
use crate::model::types::{ContentUri, MediaCategory, MediaEntry, MediaRow};
use crate::utils::log_debug;

/// Template selector for a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewType {
    ImageVideo = 1,
    Contact = 2,
    Audio = 3,
    Document = 4,
}

impl ViewType {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Types 2-4 share the label template
    pub fn uses_label_template(&self) -> bool {
        !matches!(self, ViewType::ImageVideo)
    }
}

/// View type for a row, from its leading entry; empty rows use the grid
pub fn view_type_for(row: &MediaRow) -> ViewType {
    match row.category() {
        Some(MediaCategory::Contact) => ViewType::Contact,
        Some(MediaCategory::Audio) => ViewType::Audio,
        Some(MediaCategory::Document) => ViewType::Document,
        Some(MediaCategory::Image) | Some(MediaCategory::Video) | None => ViewType::ImageVideo,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HolderId(pub u64);

/// A grid slot an image load renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotTarget {
    pub holder: HolderId,
    pub slot: usize,
}

/// Asynchronous image loading into grid slots
///
/// Implementations show a placeholder while a load is pending and a
/// fallback image when it fails.
pub trait ImageLoader {
    fn load(&mut self, uri: &ContentUri, target: SlotTarget);

    /// Drop whatever the slot was showing or waiting for
    fn clear(&mut self, target: SlotTarget);
}

/// One cell of the grid template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotView {
    pub source: Option<ContentUri>,
    pub video_badge: bool,
}

impl SlotView {
    pub fn is_empty(&self) -> bool {
        self.source.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridHolder {
    pub id: HolderId,
    pub slots: [SlotView; GRID_COLUMNS],
}

/// Fixed icon of the label template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelIcon {
    Contact,
    Audio,
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelHolder {
    pub id: HolderId,
    pub view_type: ViewType,
    pub name_line: String,
    pub detail_line: String,
    pub icon: Option<LabelIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewHolder {
    Grid(GridHolder),
    Label(LabelHolder),
}

impl ViewHolder {
    pub fn id(&self) -> HolderId {
        match self {
            ViewHolder::Grid(h) => h.id,
            ViewHolder::Label(h) => h.id,
        }
    }

    pub fn view_type(&self) -> ViewType {
        match self {
            ViewHolder::Grid(_) => ViewType::ImageVideo,
            ViewHolder::Label(h) => h.view_type,
        }
    }
}

const UNKNOWN_NAME: &str = "Unknown";

/// Adapter over the rows of one media screen
#[derive(Debug, Clone, Default)]
pub struct MediaAdapter {
    rows: Vec<MediaRow>,
}

impl MediaAdapter {
    pub fn new(rows: Vec<MediaRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MediaRow] {
        &self.rows
    }

    /// Replace the data set; attached holders must be invalidated by the caller
    pub fn set_rows(&mut self, rows: Vec<MediaRow>) {
        self.rows = rows;
    }

    pub fn item_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, position: usize) -> Option<&MediaRow> {
        self.rows.get(position)
    }

    pub fn view_type(&self, position: usize) -> Option<ViewType> {
        self.rows.get(position).map(view_type_for)
    }

    /// Fresh, unbound holder for a view type
    pub fn create_view_holder(&self, view_type: ViewType, id: HolderId) -> ViewHolder {
        if view_type.uses_label_template() {
            ViewHolder::Label(LabelHolder {
                id,
                view_type,
                name_line: String::new(),
                detail_line: String::new(),
                icon: None,
            })
        } else {
            ViewHolder::Grid(GridHolder {
                id,
                slots: Default::default(),
            })
        }
    }

    /// Bind the row at `position` into `holder`
    ///
    /// A holder of the wrong template is replaced by a fresh one with the
    /// same id before binding. Positions past the end leave the holder as is.
    pub fn bind_view_holder(
        &self,
        holder: &mut ViewHolder,
        position: usize,
        loader: &mut dyn ImageLoader,
    ) {
        let Some(row) = self.rows.get(position) else {
            log_debug(&format!("Adapter: bind past end ({} >= {})", position, self.rows.len()));
            return;
        };

        let view_type = view_type_for(row);
        if holder.view_type() != view_type {
            *holder = self.create_view_holder(view_type, holder.id());
        }

        match holder {
            ViewHolder::Grid(grid) => bind_grid(grid, row, loader),
            ViewHolder::Label(label) => bind_label(label, row),
        }
    }
}

fn bind_grid(holder: &mut GridHolder, row: &MediaRow, loader: &mut dyn ImageLoader) {
    for (slot, view) in holder.slots.iter_mut().enumerate() {
        let target = SlotTarget {
            holder: holder.id,
            slot,
        };

        match row.entries.get(slot) {
            Some(entry) => {
                view.source = entry.uri().cloned();
                view.video_badge = entry.category() == MediaCategory::Video;
                match &view.source {
                    Some(uri) => loader.load(uri, target),
                    None => loader.clear(target),
                }
            }
            None => {
                // Recycled holders may still show a longer row's content
                *view = SlotView::default();
                loader.clear(target);
            }
        }
    }
}

fn bind_label(holder: &mut LabelHolder, row: &MediaRow) {
    let Some(entry) = row.entries.first() else {
        return;
    };

    let (name_line, detail_line, icon) = match entry {
        MediaEntry::Contact { name, number } => (
            format!("Name: {}", name.as_deref().unwrap_or(UNKNOWN_NAME)),
            format!("Number: {}", number.as_deref().unwrap_or(UNKNOWN_NAME)),
            LabelIcon::Contact,
        ),
        MediaEntry::Audio {
            display_name, size, ..
        } => (
            format!("File: {}", display_name.as_deref().unwrap_or(UNKNOWN_NAME)),
            format!("Size: {}", format_file_size(*size)),
            LabelIcon::Audio,
        ),
        MediaEntry::Document {
            display_name, size, ..
        } => (
            format!("File: {}", display_name.as_deref().unwrap_or(UNKNOWN_NAME)),
            format!("Size: {}", format_file_size(*size)),
            LabelIcon::Folder,
        ),
        // Grid entries never reach the label template through view_type_for
        MediaEntry::Image { uri } | MediaEntry::Video { uri } => {
            (format!("File: {}", uri), String::new(), LabelIcon::Folder)
        }
    };

    holder.name_line = name_line;
    holder.detail_line = detail_line;
    holder.icon = Some(icon);
}

/// Keeps holders attached to visible positions and recycles the rest
#[derive(Debug, Default)]
pub struct Recycler {
    attached: Vec<(usize, ViewHolder)>,
    scrap: HashMap<ViewType, Vec<ViewHolder>>,
    next_id: u64,
}

impl Recycler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach and bind holders for every position in `range`
    ///
    /// Positions that left the range give their holders back to the scrap
    /// pool first, so scrolling reuses them instead of creating new ones.
    /// Positions already attached keep their binding.
    pub fn layout(
        &mut self,
        adapter: &MediaAdapter,
        range: Range<usize>,
        loader: &mut dyn ImageLoader,
    ) {
        let range = range.start.min(adapter.item_count())..range.end.min(adapter.item_count());

        let mut kept = Vec::with_capacity(self.attached.len());
        for (position, holder) in self.attached.drain(..) {
            if range.contains(&position) {
                kept.push((position, holder));
            } else {
                self.scrap.entry(holder.view_type()).or_default().push(holder);
            }
        }
        self.attached = kept;

        for position in range {
            if self.attached.iter().any(|(p, _)| *p == position) {
                continue;
            }
            let Some(view_type) = adapter.view_type(position) else {
                continue;
            };

            let mut holder = match self.scrap.get_mut(&view_type).and_then(Vec::pop) {
                Some(holder) => holder,
                None => {
                    let id = HolderId(self.next_id);
                    self.next_id += 1;
                    log_debug(&format!(
                        "Recycler: new holder {} for view type {}",
                        id.0,
                        view_type.code()
                    ));
                    adapter.create_view_holder(view_type, id)
                }
            };

            adapter.bind_view_holder(&mut holder, position, loader);
            self.attached.push((position, holder));
        }

        self.attached.sort_by_key(|(position, _)| *position);
    }

    /// Detach everything (after the data set changed)
    pub fn invalidate(&mut self) {
        for (_, holder) in self.attached.drain(..) {
            self.scrap.entry(holder.view_type()).or_default().push(holder);
        }
    }

    /// Attached holders in position order
    pub fn attached(&self) -> impl Iterator<Item = (usize, &ViewHolder)> {
        self.attached.iter().map(|(position, holder)| (*position, holder))
    }

    pub fn holder_at(&self, position: usize) -> Option<&ViewHolder> {
        self.attached
            .iter()
            .find(|(p, _)| *p == position)
            .map(|(_, holder)| holder)
    }

    /// Number of holders ever created
    pub fn created_count(&self) -> u64 {
        self.next_id
    }
}
