//! UI Model
//!
//! This sub-model contains all state related to the user interface:
//! preferences, dialogs, popups, and visual state.

use std::time::Instant;

use super::types::{MediaCategory, PermissionPromptState, SettingsPanelState, VimCommandState};
use crate::permissions::Permission;

/// UI preferences and popups
#[derive(Clone, Debug)]
pub struct UiModel {
    // ============================================
    // PREFERENCES
    // ============================================
    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    /// Vim command state (for 'gg' double-key)
    pub vim_command_state: VimCommandState,

    // ============================================
    // HOME
    // ============================================
    /// Selected index into `MediaCategory::ALL`
    pub home_selection: usize,

    // ============================================
    // DIALOGS & POPUPS
    // ============================================
    /// OS-style permission prompt awaiting an answer
    pub permission_prompt: Option<PermissionPromptState>,

    /// "Permission Required" rationale dialog for a category
    pub rationale_dialog: Option<MediaCategory>,

    /// "Permission Denied" dialog offering to open settings
    pub settings_dialog: Option<MediaCategory>,

    /// Application permission settings panel
    pub settings_panel: Option<SettingsPanelState>,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            vim_mode,
            vim_command_state: VimCommandState::None,
            home_selection: 0,
            permission_prompt: None,
            rationale_dialog: None,
            settings_dialog: None,
            settings_panel: None,
            toast_message: None,
            should_quit: false,
        }
    }

    /// Category highlighted on the home screen
    pub fn home_category(&self) -> MediaCategory {
        MediaCategory::ALL[self.home_selection.min(MediaCategory::ALL.len() - 1)]
    }

    /// Check if any modal dialog is currently showing
    pub fn has_modal(&self) -> bool {
        self.permission_prompt.is_some()
            || self.rationale_dialog.is_some()
            || self.settings_dialog.is_some()
            || self.settings_panel.is_some()
    }

    /// Close all modal dialogs
    pub fn close_all_modals(&mut self) {
        self.permission_prompt = None;
        self.rationale_dialog = None;
        self.settings_dialog = None;
        self.settings_panel = None;
    }

    /// Permission highlighted in the settings panel
    pub fn settings_selection(&self) -> Option<Permission> {
        self.settings_panel
            .map(|panel| Permission::ALL[panel.selected.min(Permission::ALL.len() - 1)])
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    /// Check if toast should be dismissed
    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_model_creation() {
        let model = UiModel::new(true);
        assert!(model.vim_mode);
        assert!(!model.should_quit);
        assert!(!model.has_modal());
        assert_eq!(model.home_category(), MediaCategory::Image);
    }

    #[test]
    fn test_has_modal() {
        let mut model = UiModel::new(false);
        model.rationale_dialog = Some(MediaCategory::Audio);
        assert!(model.has_modal());

        model.rationale_dialog = None;
        model.settings_panel = Some(SettingsPanelState::default());
        assert!(model.has_modal());
    }

    #[test]
    fn test_close_all_modals() {
        let mut model = UiModel::new(false);
        model.settings_dialog = Some(MediaCategory::Video);
        model.settings_panel = Some(SettingsPanelState { selected: 2 });

        model.close_all_modals();
        assert!(!model.has_modal());
    }

    #[test]
    fn test_settings_selection_clamps() {
        let mut model = UiModel::new(false);
        assert!(model.settings_selection().is_none());

        model.settings_panel = Some(SettingsPanelState { selected: 99 });
        assert_eq!(model.settings_selection(), Permission::ALL.last().copied());
    }

    #[test]
    fn test_toast() {
        let mut model = UiModel::new(false);
        assert!(model.toast_message.is_none());

        model.show_toast("Test".to_string());
        assert!(model.toast_message.is_some());
        assert!(!model.should_dismiss_toast());

        model.dismiss_toast();
        assert!(model.toast_message.is_none());
    }
}
