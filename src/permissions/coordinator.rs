//! Permission request coordinator
//!
//! One coordinator lives per media screen. It decides whether the screen's
//! category is already accessible, issues prompts with correlation tokens,
//! and resumes when a response arrives. Denials are retried up to
//! `MAX_PERMISSION_REQUESTS` prompts; suppression ("don't ask again") ends
//! the flow immediately without consuming an attempt.

use super::{
    is_granted, is_suppressed, required_permissions, response_grants, should_show_rationale,
    PermissionRequest, PermissionResponse, PermissionStatus, RequestToken,
    MAX_PERMISSION_REQUESTS,
};
use crate::model::types::MediaCategory;
use crate::utils::log_debug;

/// Where the screen is in the permission flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Nothing checked yet
    Unchecked,
    /// A check ran and a prompt is outstanding
    Checking,
    /// Rationale dialog is up, waiting for OK/Cancel
    AwaitingRationale,
    Granted,
    /// Denied for now; the screen stays empty until the flow resumes
    Denied,
    /// Retry ceiling reached or prompts suppressed; only settings can help
    PermanentlyDenied,
}

impl PermissionState {
    pub fn label(&self) -> &'static str {
        match self {
            PermissionState::Unchecked => "Unchecked",
            PermissionState::Checking => "Requesting",
            PermissionState::AwaitingRationale => "Needs rationale",
            PermissionState::Granted => "Granted",
            PermissionState::Denied => "Denied",
            PermissionState::PermanentlyDenied => "Denied (settings)",
        }
    }
}

/// What the caller must do after a coordinator step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionAction {
    None,
    /// Permission available: start the one content load for this screen
    Load,
    /// Explain why access is needed before prompting
    ShowRationale,
    /// Show the OS prompt for these permissions
    Request(PermissionRequest),
    /// Offer to open the application settings page
    ShowSettingsPrompt,
}

#[derive(Debug, Clone)]
pub struct PermissionCoordinator {
    category: MediaCategory,
    api_level: u32,
    state: PermissionState,
    denials: u32,
    next_token: u64,
    pending: Option<RequestToken>,
}

impl PermissionCoordinator {
    pub fn new(category: MediaCategory, api_level: u32) -> Self {
        Self {
            category,
            api_level,
            state: PermissionState::Unchecked,
            denials: 0,
            next_token: 1,
            pending: None,
        }
    }

    pub fn category(&self) -> MediaCategory {
        self.category
    }

    pub fn state(&self) -> PermissionState {
        self.state
    }

    /// Number of denied prompts so far
    pub fn denials(&self) -> u32 {
        self.denials
    }

    /// Token of the outstanding prompt, if any
    pub fn pending_token(&self) -> Option<RequestToken> {
        self.pending
    }

    /// Run the permission check for this screen's category
    ///
    /// Suppression is consulted before any prompt is issued, so a "don't ask
    /// again" answer short-circuits regardless of the attempt counter.
    pub fn check(&mut self, host: &dyn PermissionStatus) -> PermissionAction {
        self.state = PermissionState::Checking;

        if is_granted(host, self.category, self.api_level) {
            return self.grant();
        }

        if is_suppressed(host, self.category, self.api_level) {
            log_debug(&format!(
                "Permission: {} suppressed by host after {} denial(s)",
                self.category, self.denials
            ));
            return self.deny_permanently();
        }

        if should_show_rationale(host, self.category, self.api_level) {
            log_debug(&format!("Permission: showing rationale for {}", self.category));
            self.state = PermissionState::AwaitingRationale;
            return PermissionAction::ShowRationale;
        }

        self.issue_request()
    }

    /// User accepted the rationale dialog
    pub fn accept_rationale(&mut self) -> PermissionAction {
        if self.state != PermissionState::AwaitingRationale {
            return PermissionAction::None;
        }
        self.state = PermissionState::Checking;
        self.issue_request()
    }

    /// User cancelled the rationale dialog; the screen stays empty
    pub fn dismiss_rationale(&mut self) -> PermissionAction {
        if self.state == PermissionState::AwaitingRationale {
            log_debug(&format!("Permission: rationale for {} cancelled", self.category));
            self.state = PermissionState::Denied;
        }
        PermissionAction::None
    }

    /// Resume the flow with a prompt response
    ///
    /// Responses whose token doesn't match the outstanding prompt are stale
    /// and ignored.
    pub fn on_response(
        &mut self,
        response: &PermissionResponse,
        host: &dyn PermissionStatus,
    ) -> PermissionAction {
        if self.pending != Some(response.token) {
            log_debug(&format!(
                "Permission: ignoring stale response {:?} (pending {:?})",
                response.token, self.pending
            ));
            return PermissionAction::None;
        }
        self.pending = None;

        if response_grants(self.category, self.api_level, &response.results) {
            return self.grant();
        }

        self.denials += 1;
        log_debug(&format!(
            "Permission: {} denied ({}/{})",
            self.category, self.denials, MAX_PERMISSION_REQUESTS
        ));

        if self.denials >= MAX_PERMISSION_REQUESTS {
            return self.deny_permanently();
        }

        self.state = PermissionState::Denied;
        self.check(host)
    }

    fn issue_request(&mut self) -> PermissionAction {
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);

        let permissions = required_permissions(self.category, self.api_level);
        log_debug(&format!(
            "Permission: requesting {:?} for {} (token {})",
            permissions, self.category, token.0
        ));

        PermissionAction::Request(PermissionRequest { token, permissions })
    }

    fn grant(&mut self) -> PermissionAction {
        log_debug(&format!("Permission: {} granted", self.category));
        self.state = PermissionState::Granted;
        self.pending = None;
        PermissionAction::Load
    }

    fn deny_permanently(&mut self) -> PermissionAction {
        self.state = PermissionState::PermanentlyDenied;
        self.pending = None;
        PermissionAction::ShowSettingsPrompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::testing::FakeHost;
    use crate::permissions::Permission;

    fn expect_request(action: PermissionAction) -> PermissionRequest {
        match action {
            PermissionAction::Request(request) => request,
            other => panic!("expected a prompt, got {:?}", other),
        }
    }

    #[test]
    fn test_already_granted_loads_without_prompt() {
        let mut host = FakeHost::default();
        host.granted.insert(Permission::ReadContacts);
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Contact, 34);

        assert_eq!(coordinator.check(&host), PermissionAction::Load);
        assert_eq!(coordinator.state(), PermissionState::Granted);
    }

    #[test]
    fn test_first_check_prompts_for_required_set() {
        let host = FakeHost::default();
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Image, 34);

        let request = expect_request(coordinator.check(&host));
        assert_eq!(
            request.permissions,
            vec![Permission::ReadMediaImages, Permission::ReadMediaVideo]
        );
        assert_eq!(coordinator.state(), PermissionState::Checking);
        assert_eq!(coordinator.pending_token(), Some(request.token));
    }

    #[test]
    fn test_granted_response_loads() {
        let host = FakeHost::default();
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Audio, 34);
        let request = expect_request(coordinator.check(&host));

        let action = coordinator.on_response(&PermissionResponse::uniform(&request, true), &host);
        assert_eq!(action, PermissionAction::Load);
        assert_eq!(coordinator.denials(), 0);
    }

    #[test]
    fn test_third_denial_is_permanent() {
        let host = FakeHost::default();
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Video, 34);
        let mut prompts = 0;

        let mut action = coordinator.check(&host);
        loop {
            match action {
                PermissionAction::Request(request) => {
                    prompts += 1;
                    action = coordinator
                        .on_response(&PermissionResponse::uniform(&request, false), &host);
                }
                PermissionAction::ShowSettingsPrompt => break,
                other => panic!("unexpected action {:?}", other),
            }
        }

        assert_eq!(prompts, 3);
        assert_eq!(coordinator.denials(), 3);
        assert_eq!(coordinator.state(), PermissionState::PermanentlyDenied);
    }

    #[test]
    fn test_suppression_short_circuits_without_consuming_attempts() {
        let mut host = FakeHost::default();
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Contact, 34);
        let request = expect_request(coordinator.check(&host));

        // User picks "don't ask again" on the first prompt
        host.suppressed.insert(Permission::ReadContacts);
        let action = coordinator.on_response(&PermissionResponse::uniform(&request, false), &host);

        assert_eq!(action, PermissionAction::ShowSettingsPrompt);
        assert_eq!(coordinator.denials(), 1);
        assert_eq!(coordinator.state(), PermissionState::PermanentlyDenied);
    }

    #[test]
    fn test_dont_ask_again_on_second_denial_stops_prompting() {
        let mut host = FakeHost::default();
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Audio, 34);

        let first = expect_request(coordinator.check(&host));
        let second = expect_request(
            coordinator.on_response(&PermissionResponse::uniform(&first, false), &host),
        );
        assert_eq!(coordinator.denials(), 1);

        // Second prompt answered with "don't ask again"
        host.suppressed.insert(Permission::ReadMediaAudio);
        let action = coordinator.on_response(&PermissionResponse::uniform(&second, false), &host);

        assert_eq!(action, PermissionAction::ShowSettingsPrompt);
        assert_eq!(coordinator.denials(), 2);
        assert_eq!(coordinator.state(), PermissionState::PermanentlyDenied);
        assert!(coordinator.pending_token().is_none());

        // Re-checking still goes to settings, never a third prompt
        assert_eq!(coordinator.check(&host), PermissionAction::ShowSettingsPrompt);
        assert_eq!(coordinator.denials(), 2);
    }

    #[test]
    fn test_suppressed_before_first_check() {
        let mut host = FakeHost::default();
        host.suppressed.insert(Permission::ReadExternalStorage);
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Document, 30);

        assert_eq!(coordinator.check(&host), PermissionAction::ShowSettingsPrompt);
        assert_eq!(coordinator.denials(), 0);
        assert!(coordinator.pending_token().is_none());
    }

    #[test]
    fn test_rationale_then_accept_prompts() {
        let mut host = FakeHost::default();
        host.rationale.insert(Permission::ReadMediaAudio);
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Audio, 34);

        assert_eq!(coordinator.check(&host), PermissionAction::ShowRationale);
        assert_eq!(coordinator.state(), PermissionState::AwaitingRationale);

        let request = expect_request(coordinator.accept_rationale());
        assert_eq!(request.permissions, vec![Permission::ReadMediaAudio]);
    }

    #[test]
    fn test_rationale_cancel_leaves_screen_denied() {
        let mut host = FakeHost::default();
        host.rationale.insert(Permission::ReadContacts);
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Contact, 34);
        coordinator.check(&host);

        assert_eq!(coordinator.dismiss_rationale(), PermissionAction::None);
        assert_eq!(coordinator.state(), PermissionState::Denied);
        // Accepting afterwards does nothing
        assert_eq!(coordinator.accept_rationale(), PermissionAction::None);
    }

    #[test]
    fn test_stale_token_is_ignored() {
        let host = FakeHost::default();
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Image, 34);
        let request = expect_request(coordinator.check(&host));

        let stale = PermissionResponse {
            token: RequestToken(request.token.0 + 100),
            results: Default::default(),
        };
        assert_eq!(coordinator.on_response(&stale, &host), PermissionAction::None);
        assert_eq!(coordinator.denials(), 0);
        assert_eq!(coordinator.pending_token(), Some(request.token));
    }

    #[test]
    fn test_each_prompt_gets_a_fresh_token() {
        let host = FakeHost::default();
        let mut coordinator = PermissionCoordinator::new(MediaCategory::Image, 34);
        let first = expect_request(coordinator.check(&host));
        let second = expect_request(
            coordinator.on_response(&PermissionResponse::uniform(&first, false), &host),
        );
        assert_ne!(first.token, second.token);

        // Replaying the first response no longer matches
        assert_eq!(
            coordinator.on_response(&PermissionResponse::uniform(&first, true), &host),
            PermissionAction::None
        );
    }
}
