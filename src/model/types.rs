//! Shared types for the Model
//!
//! These types are used across the loader, the adapter and the UI and
//! represent the fundamental domain concepts: content categories, entries
//! and the rows the list is virtualized over.

use std::fmt;

use crate::permissions::PermissionRequest;

/// Content kind selected once per media screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaCategory {
    Image,
    Video,
    Contact,
    Audio,
    Document,
}

impl MediaCategory {
    /// All categories in the order the home screen lists them
    pub const ALL: [MediaCategory; 5] = [
        MediaCategory::Image,
        MediaCategory::Video,
        MediaCategory::Contact,
        MediaCategory::Audio,
        MediaCategory::Document,
    ];

    /// Parse a screen entry token (`IMAGES`, `VIDEOS`, ...)
    ///
    /// Unknown tokens yield `None`; callers treat that as an inert screen.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "IMAGES" => Some(MediaCategory::Image),
            "VIDEOS" => Some(MediaCategory::Video),
            "CONTACTS" => Some(MediaCategory::Contact),
            "AUDIOS" => Some(MediaCategory::Audio),
            "DOCUMENTS" => Some(MediaCategory::Document),
            _ => None,
        }
    }

    /// The entry token for this category, also used as the screen heading
    pub fn token(&self) -> &'static str {
        match self {
            MediaCategory::Image => "IMAGES",
            MediaCategory::Video => "VIDEOS",
            MediaCategory::Contact => "CONTACTS",
            MediaCategory::Audio => "AUDIOS",
            MediaCategory::Document => "DOCUMENTS",
        }
    }

    /// Image and video rows render as a 4-column grid
    pub fn is_grid(&self) -> bool {
        matches!(self, MediaCategory::Image | MediaCategory::Video)
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Resource locator for one catalogued item
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentUri(String);

impl ContentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Append a row id to a collection uri (`<collection>/<id>`)
    pub fn with_appended_id(base: &str, id: i64) -> Self {
        Self(format!("{}/{}", base.trim_end_matches('/'), id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Trailing numeric id, if the uri ends with one
    pub fn id(&self) -> Option<i64> {
        self.0.rsplit('/').next().and_then(|s| s.parse().ok())
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One content item; each variant carries only the fields its category uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEntry {
    Image {
        uri: ContentUri,
    },
    Video {
        uri: ContentUri,
    },
    Audio {
        uri: ContentUri,
        display_name: Option<String>,
        size: Option<u64>,
    },
    Document {
        uri: ContentUri,
        display_name: Option<String>,
        size: Option<u64>,
    },
    Contact {
        name: Option<String>,
        number: Option<String>,
    },
}

impl MediaEntry {
    pub fn category(&self) -> MediaCategory {
        match self {
            MediaEntry::Image { .. } => MediaCategory::Image,
            MediaEntry::Video { .. } => MediaCategory::Video,
            MediaEntry::Audio { .. } => MediaCategory::Audio,
            MediaEntry::Document { .. } => MediaCategory::Document,
            MediaEntry::Contact { .. } => MediaCategory::Contact,
        }
    }

    /// Resource locator (contacts have none)
    pub fn uri(&self) -> Option<&ContentUri> {
        match self {
            MediaEntry::Image { uri }
            | MediaEntry::Video { uri }
            | MediaEntry::Audio { uri, .. }
            | MediaEntry::Document { uri, .. } => Some(uri),
            MediaEntry::Contact { .. } => None,
        }
    }
}

/// A single list position: 1-4 entries sharing one category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaRow {
    pub entries: Vec<MediaEntry>,
}

impl MediaRow {
    pub fn new(entries: Vec<MediaEntry>) -> Self {
        Self { entries }
    }

    /// Category of the leading entry (`None` for an empty row)
    pub fn category(&self) -> Option<MediaCategory> {
        self.entries.first().map(MediaEntry::category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Vim command state for multi-key commands like `gg`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VimCommandState {
    #[default]
    None,
    WaitingForSecondG,
}

/// The three answers the permission prompt offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Allow,
    Deny,
    DenyDontAskAgain,
}

impl PromptChoice {
    pub const ALL: [PromptChoice; 3] = [
        PromptChoice::Allow,
        PromptChoice::Deny,
        PromptChoice::DenyDontAskAgain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PromptChoice::Allow => "Allow",
            PromptChoice::Deny => "Deny",
            PromptChoice::DenyDontAskAgain => "Deny and don't ask again",
        }
    }

    pub fn grants(&self) -> bool {
        matches!(self, PromptChoice::Allow)
    }
}

/// Permission prompt dialog state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionPromptState {
    pub request: PermissionRequest,
    pub category: MediaCategory,
    /// Index into `PromptChoice::ALL`
    pub selected: usize,
}

impl PermissionPromptState {
    pub fn choice(&self) -> PromptChoice {
        PromptChoice::ALL[self.selected.min(PromptChoice::ALL.len() - 1)]
    }
}

/// Permission settings panel state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsPanelState {
    /// Index into `Permission::ALL`
    pub selected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_for_every_category() {
        for category in MediaCategory::ALL {
            assert_eq!(MediaCategory::from_token(category.token()), Some(category));
        }
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        assert_eq!(MediaCategory::from_token("MUSIC"), None);
        assert_eq!(MediaCategory::from_token("images"), None);
        assert_eq!(MediaCategory::from_token(""), None);
    }

    #[test]
    fn test_grid_categories() {
        assert!(MediaCategory::Image.is_grid());
        assert!(MediaCategory::Video.is_grid());
        assert!(!MediaCategory::Contact.is_grid());
        assert!(!MediaCategory::Audio.is_grid());
        assert!(!MediaCategory::Document.is_grid());
    }

    #[test]
    fn test_content_uri_appends_id() {
        let uri = ContentUri::with_appended_id("content://media/external/images/media/", 42);
        assert_eq!(uri.as_str(), "content://media/external/images/media/42");
        assert_eq!(uri.id(), Some(42));
    }

    #[test]
    fn test_contact_entry_has_no_uri() {
        let entry = MediaEntry::Contact {
            name: Some("Ada".to_string()),
            number: Some("555-0100".to_string()),
        };
        assert!(entry.uri().is_none());
        assert_eq!(entry.category(), MediaCategory::Contact);
    }

    #[test]
    fn test_empty_row_has_no_category() {
        assert_eq!(MediaRow::default().category(), None);
    }

    #[test]
    fn test_prompt_choice_clamps_selection() {
        let state = PermissionPromptState {
            request: PermissionRequest {
                token: crate::permissions::RequestToken(1),
                permissions: vec![],
            },
            category: MediaCategory::Audio,
            selected: 9,
        };
        assert_eq!(state.choice(), PromptChoice::DenyDontAskAgain);
        assert!(PromptChoice::Allow.grants());
        assert!(!PromptChoice::Deny.grants());
    }
}
