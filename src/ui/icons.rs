use ratatui::{
    style::{Color, Style},
    text::Span,
};

use mediamaster::adapter::LabelIcon;
use mediamaster::MediaCategory;

/// Icon display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconMode {
    Emoji,    // Standard emoji icons (🖼, 🎵, etc.)
    NerdFont, // Nerd Fonts icons (U+F03E, etc.)
}

impl IconMode {
    /// Parse the `icon_mode` config value; unknown values use Nerd Fonts
    pub fn from_config(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "emoji" => IconMode::Emoji,
            _ => IconMode::NerdFont,
        }
    }
}

/// Icon theme using terminal colors (respects user's terminal theme)
#[derive(Debug, Clone)]
pub struct IconTheme {
    pub image_color: Color,
    pub video_color: Color,
    pub contact_color: Color,
    pub audio_color: Color,
    pub document_color: Color,

    /// Thumbnail not loaded yet
    pub placeholder_color: Color,
    /// Thumbnail failed to load
    pub fallback_color: Color,
    pub badge_color: Color,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            image_color: Color::Magenta,
            video_color: Color::Red,
            contact_color: Color::Green,
            audio_color: Color::Cyan,
            document_color: Color::Blue,

            placeholder_color: Color::DarkGray,
            fallback_color: Color::Red,
            badge_color: Color::Yellow,
        }
    }
}

/// Icon renderer that handles both emoji and Nerd Font modes
pub struct IconRenderer {
    mode: IconMode,
    theme: IconTheme,
}

impl IconRenderer {
    pub fn new(mode: IconMode, theme: IconTheme) -> Self {
        Self { mode, theme }
    }

    /// Icon for a category on the home list
    pub fn category_icon(&self, category: MediaCategory) -> Span<'static> {
        let (emoji, nerd, color) = match category {
            MediaCategory::Image => ("🖼 ", "\u{F03E} ", self.theme.image_color),
            MediaCategory::Video => ("🎬 ", "\u{F03D} ", self.theme.video_color),
            MediaCategory::Contact => ("👤 ", "\u{F007} ", self.theme.contact_color),
            MediaCategory::Audio => ("🎵 ", "\u{F001} ", self.theme.audio_color),
            MediaCategory::Document => ("📁 ", "\u{F07B} ", self.theme.document_color),
        };
        self.styled(emoji, nerd, color)
    }

    /// Fixed icon of a label row
    pub fn label_icon(&self, icon: LabelIcon) -> Span<'static> {
        match icon {
            LabelIcon::Contact => self.category_icon(MediaCategory::Contact),
            LabelIcon::Audio => self.category_icon(MediaCategory::Audio),
            LabelIcon::Folder => self.category_icon(MediaCategory::Document),
        }
    }

    /// Overlay marking a video thumbnail
    pub fn video_badge(&self) -> Span<'static> {
        self.styled("▶", "\u{F04B}", self.theme.badge_color)
    }

    /// Shown while a thumbnail is loading
    pub fn placeholder(&self) -> Span<'static> {
        self.styled("⏳", "\u{F254}", self.theme.placeholder_color)
    }

    /// Shown when a thumbnail could not be loaded
    pub fn fallback(&self) -> Span<'static> {
        self.styled("⚠️", "\u{F071}", self.theme.fallback_color)
    }

    fn styled(&self, emoji: &'static str, nerd: &'static str, color: Color) -> Span<'static> {
        let icon = match self.mode {
            IconMode::Emoji => emoji,
            IconMode::NerdFont => nerd,
        };
        Span::styled(icon, Style::default().fg(color))
    }
}
