//! Integration tests for the permission flow against the grant table
//!
//! These walk a screen's coordinator through prompts the same way the app
//! does: every answer is recorded in the grant table first, then fed back
//! as a response.

use mediamaster::model::{Model, PromptChoice};
use mediamaster::permissions::{
    GrantDb, GrantStatus, Permission, PermissionAction, PermissionRequest, PermissionResponse,
    PermissionState,
};
use mediamaster::MediaCategory;

fn answer(grants: &GrantDb, request: &PermissionRequest, choice: PromptChoice) -> PermissionResponse {
    for permission in &request.permissions {
        grants
            .record_prompt_result(
                *permission,
                choice.grants(),
                choice == PromptChoice::DenyDontAskAgain,
            )
            .unwrap();
    }
    PermissionResponse::uniform(request, choice.grants())
}

fn expect_request(action: PermissionAction) -> PermissionRequest {
    match action {
        PermissionAction::Request(request) => request,
        other => panic!("expected a prompt, got {:?}", other),
    }
}

/// Test: Deny three times → rationale between prompts, then settings
#[test]
fn test_repeated_denials_end_in_settings_prompt() {
    let grants = GrantDb::open_in_memory().unwrap();
    let mut model = Model::new(false, 34);
    let screen = model.open_screen(MediaCategory::Audio);

    let mut request = expect_request(screen.coordinator.check(&grants));
    for attempt in 1..=3 {
        let response = answer(&grants, &request, PromptChoice::Deny);
        let action = screen.coordinator.on_response(&response, &grants);

        if attempt < 3 {
            // A plain denial asks for the rationale before the next prompt
            assert_eq!(action, PermissionAction::ShowRationale);
            request = expect_request(screen.coordinator.accept_rationale());
        } else {
            assert_eq!(action, PermissionAction::ShowSettingsPrompt);
        }
    }

    assert_eq!(screen.permission_state(), PermissionState::PermanentlyDenied);
    assert_eq!(grants.denial_count(Permission::ReadMediaAudio).unwrap(), 3);
    assert_eq!(screen.row_count(), 0, "Denied screen stays empty");
}

/// Test: "Don't ask again" goes straight to the settings prompt
#[test]
fn test_dont_ask_again_short_circuits() {
    let grants = GrantDb::open_in_memory().unwrap();
    let mut model = Model::new(false, 34);
    let screen = model.open_screen(MediaCategory::Contact);

    let request = expect_request(screen.coordinator.check(&grants));
    let response = answer(&grants, &request, PromptChoice::DenyDontAskAgain);

    assert_eq!(
        screen.coordinator.on_response(&response, &grants),
        PermissionAction::ShowSettingsPrompt
    );
    assert_eq!(
        grants.status(Permission::ReadContacts).unwrap(),
        GrantStatus::DeniedForever
    );

    // A new screen instance is blocked before any prompt
    let screen = model.open_screen(MediaCategory::Contact);
    assert_eq!(
        screen.coordinator.check(&grants),
        PermissionAction::ShowSettingsPrompt
    );
}

/// Test: A grant from an earlier screen carries over to the next one
#[test]
fn test_grant_persists_across_screens() {
    let grants = GrantDb::open_in_memory().unwrap();
    let mut model = Model::new(false, 34);

    let screen = model.open_screen(MediaCategory::Image);
    let request = expect_request(screen.coordinator.check(&grants));
    let response = answer(&grants, &request, PromptChoice::Allow);
    assert_eq!(
        screen.coordinator.on_response(&response, &grants),
        PermissionAction::Load
    );

    // Video shares the image/video permission set
    let screen = model.open_screen(MediaCategory::Video);
    assert_eq!(screen.coordinator.check(&grants), PermissionAction::Load);
    assert_eq!(screen.permission_state(), PermissionState::Granted);
}

/// Test: Enabling the permission in settings lets a fresh flow load
#[test]
fn test_settings_toggle_then_restart_loads() {
    let grants = GrantDb::open_in_memory().unwrap();
    grants
        .record_prompt_result(Permission::ReadExternalStorage, false, true)
        .unwrap();

    let mut model = Model::new(false, 30);
    let api_level = model.api_level;
    let screen = model.open_screen(MediaCategory::Document);
    assert_eq!(
        screen.coordinator.check(&grants),
        PermissionAction::ShowSettingsPrompt
    );

    grants
        .set_granted(Permission::ReadExternalStorage, true)
        .unwrap();
    screen.restart_permission_flow(api_level);

    assert_eq!(screen.permission_state(), PermissionState::Unchecked);
    assert_eq!(screen.coordinator.check(&grants), PermissionAction::Load);
}

/// Test: Reset clears "don't ask again" so prompting resumes
#[test]
fn test_reset_allows_prompting_again() {
    let grants = GrantDb::open_in_memory().unwrap();
    grants
        .record_prompt_result(Permission::ReadContacts, false, true)
        .unwrap();
    grants.reset(Permission::ReadContacts).unwrap();

    let mut model = Model::new(false, 34);
    let screen = model.open_screen(MediaCategory::Contact);
    let request = expect_request(screen.coordinator.check(&grants));
    assert_eq!(request.permissions, vec![Permission::ReadContacts]);
}

/// Test: Documents on granular API levels accept any one media permission
#[test]
fn test_documents_granted_by_any_media_permission() {
    let grants = GrantDb::open_in_memory().unwrap();
    grants.set_granted(Permission::ReadMediaAudio, true).unwrap();

    let mut model = Model::new(false, 34);
    let screen = model.open_screen(MediaCategory::Document);
    assert_eq!(screen.coordinator.check(&grants), PermissionAction::Load);
}
