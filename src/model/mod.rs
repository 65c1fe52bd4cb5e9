//! Pure Application Model - Elm Architecture
//!
//! This module defines the pure, cloneable state for the application.
//! The Model is organized into focused sub-models:
//!
//! - **UiModel**: Preferences, home selection, dialogs, toast
//! - **ScreenModel**: The open media screen (permission flow, rows, viewport)
//!
//! No services live here: the grant table, the catalog and background tasks
//! are owned by the runtime `App`.

pub mod screen;
pub mod types;
pub mod ui;

pub use screen::ScreenModel;
pub use types::*;
pub use ui::UiModel;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub ui: UiModel,

    /// Open media screen; `None` on the home screen
    pub screen: Option<ScreenModel>,

    /// Host API level the permission mapping is evaluated against
    pub api_level: u32,

    next_screen_id: u64,
}

impl Model {
    pub fn new(vim_mode: bool, api_level: u32) -> Self {
        Self {
            ui: UiModel::new(vim_mode),
            screen: None,
            api_level,
            next_screen_id: 1,
        }
    }

    /// Replace the current screen with a fresh one for `category`
    pub fn open_screen(&mut self, category: MediaCategory) -> &mut ScreenModel {
        let id = self.next_screen_id;
        self.next_screen_id += 1;
        self.screen.insert(ScreenModel::new(id, category, self.api_level))
    }

    pub fn close_screen(&mut self) {
        self.screen = None;
        self.ui.close_all_modals();
    }

    /// The open screen, if it is still the instance `screen_id`
    pub fn screen_mut(&mut self, screen_id: u64) -> Option<&mut ScreenModel> {
        self.screen.as_mut().filter(|s| s.id == screen_id)
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    pub fn show_toast(&mut self, message: String) {
        self.ui.show_toast(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let model = Model::new(false, 34);
        assert!(model.screen.is_none());
        assert!(!model.has_modal());
        assert_eq!(model.api_level, 34);
    }

    #[test]
    fn test_reopening_gets_new_screen_id() {
        let mut model = Model::new(false, 34);
        let first = model.open_screen(MediaCategory::Audio).id;
        model.close_screen();
        let second = model.open_screen(MediaCategory::Audio).id;

        assert_ne!(first, second);
        assert!(model.screen_mut(first).is_none());
        assert!(model.screen_mut(second).is_some());
    }

    #[test]
    fn test_close_screen_drops_dialogs() {
        let mut model = Model::new(false, 34);
        model.open_screen(MediaCategory::Contact);
        model.ui.rationale_dialog = Some(MediaCategory::Contact);

        model.close_screen();
        assert!(model.screen.is_none());
        assert!(!model.has_modal());
    }
}
