//! Permission flow orchestration
//!
//! Connects the open screen's coordinator to the grant table, the prompt
//! and rationale dialogs, and the settings panel. Prompt answers are sent
//! through the permission channel and come back as responses in the main
//! loop, the same way an OS prompt result would arrive.

use mediamaster::model::{PermissionPromptState, PromptChoice, SettingsPanelState};
use mediamaster::permissions::{
    settings_uri, Permission, PermissionAction, PermissionResponse, PermissionState,
    PermissionStatus,
};
use mediamaster::utils::log_debug;

use crate::App;

impl App {
    /// Run the permission check for the open screen
    pub(crate) fn run_permission_check(&mut self) {
        let Some(screen) = self.model.screen.as_mut() else {
            return;
        };
        let action = screen.coordinator.check(&self.grants);
        self.apply_permission_action(action);
    }

    fn apply_permission_action(&mut self, action: PermissionAction) {
        let Some(category) = self.model.screen.as_ref().map(|s| s.category) else {
            return;
        };

        match action {
            PermissionAction::None => {}
            PermissionAction::Load => self.start_load(),
            PermissionAction::ShowRationale => {
                self.model.ui.rationale_dialog = Some(category);
            }
            PermissionAction::Request(request) => {
                self.model.ui.permission_prompt = Some(PermissionPromptState {
                    request,
                    category,
                    selected: 0,
                });
            }
            PermissionAction::ShowSettingsPrompt => {
                self.model.ui.settings_dialog = Some(category);
            }
        }
    }

    /// Record the prompt answer and deliver it as a permission response
    pub fn answer_permission_prompt(&mut self, choice: PromptChoice) {
        let Some(prompt) = self.model.ui.permission_prompt.take() else {
            return;
        };

        let dont_ask_again = choice == PromptChoice::DenyDontAskAgain;
        for permission in &prompt.request.permissions {
            if let Err(e) = self
                .grants
                .record_prompt_result(*permission, choice.grants(), dont_ask_again)
            {
                log_debug(&format!("Permission: failed to record {}: {}", permission, e));
            }
        }

        let response = PermissionResponse::uniform(&prompt.request, choice.grants());
        if self.permission_tx.send(response).is_err() {
            log_debug("Permission: response channel closed");
        }
    }

    /// Resume the open screen's flow with a prompt response
    pub fn handle_permission_response(&mut self, response: PermissionResponse) {
        let Some(screen) = self.model.screen.as_mut() else {
            log_debug(&format!(
                "Permission: dropping response {:?}, no screen open",
                response.token
            ));
            return;
        };
        let action = screen.coordinator.on_response(&response, &self.grants);
        self.apply_permission_action(action);
    }

    /// "OK" on the rationale dialog
    pub fn accept_rationale(&mut self) {
        self.model.ui.rationale_dialog = None;
        let Some(screen) = self.model.screen.as_mut() else {
            return;
        };
        let action = screen.coordinator.accept_rationale();
        self.apply_permission_action(action);
    }

    /// "Cancel" on the rationale dialog; the screen stays empty
    pub fn dismiss_rationale(&mut self) {
        self.model.ui.rationale_dialog = None;
        if let Some(screen) = self.model.screen.as_mut() {
            screen.coordinator.dismiss_rationale();
        }
    }

    /// "Go to Settings" on the permission-denied dialog
    pub fn go_to_settings(&mut self) {
        self.model.ui.settings_dialog = None;
        let uri = settings_uri(&self.package_name);
        log_debug(&format!("Permission: opening settings {}", uri));
        self.open_settings_panel();
    }

    pub fn dismiss_settings_dialog(&mut self) {
        self.model.ui.settings_dialog = None;
    }

    pub fn open_settings_panel(&mut self) {
        self.model.ui.settings_panel = Some(SettingsPanelState::default());
    }

    /// Leave the settings panel and re-check the open screen from scratch
    pub fn close_settings_panel(&mut self) {
        self.model.ui.settings_panel = None;

        let api_level = self.model.api_level;
        let Some(screen) = self.model.screen.as_mut() else {
            return;
        };
        if screen.permission_state() == PermissionState::Granted {
            return;
        }

        log_debug(&format!(
            "Permission: returned from settings, re-checking {}",
            screen.category
        ));
        screen.restart_permission_flow(api_level);
        self.run_permission_check();
    }

    pub fn settings_select_next(&mut self) {
        if let Some(panel) = self.model.ui.settings_panel.as_mut() {
            panel.selected = (panel.selected + 1) % Permission::ALL.len();
        }
    }

    pub fn settings_select_prev(&mut self) {
        if let Some(panel) = self.model.ui.settings_panel.as_mut() {
            panel.selected = (panel.selected + Permission::ALL.len() - 1) % Permission::ALL.len();
        }
    }

    /// Flip the highlighted permission between allowed and denied
    pub fn toggle_selected_grant(&mut self) {
        let Some(permission) = self.model.ui.settings_selection() else {
            return;
        };
        let granted = !self.grants.is_granted(permission);

        match self.grants.set_granted(permission, granted) {
            Ok(()) => {
                let verb = if granted { "Allowed" } else { "Denied" };
                self.model.show_toast(format!("{}: {}", verb, permission.label()));
            }
            Err(e) => {
                log_debug(&format!("Permission: failed to update {}: {}", permission, e));
                self.model.show_toast(format!("Error: {}", e));
            }
        }
    }

    /// Forget the highlighted permission's history (clears "don't ask again")
    pub fn reset_selected_grant(&mut self) {
        let Some(permission) = self.model.ui.settings_selection() else {
            return;
        };

        match self.grants.reset(permission) {
            Ok(()) => self
                .model
                .show_toast(format!("Reset: {}", permission.label())),
            Err(e) => {
                log_debug(&format!("Permission: failed to reset {}: {}", permission, e));
                self.model.show_toast(format!("Error: {}", e));
            }
        }
    }
}
