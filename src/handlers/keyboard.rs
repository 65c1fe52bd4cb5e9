//! Keyboard Input Handler
//!
//! Modal dialogs get the key first and swallow it; everything else is
//! navigation on the home list or the open media screen.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use mediamaster::model::{PromptChoice, VimCommandState};
use mediamaster::permissions::PermissionState;
use mediamaster::MediaCategory;

use crate::App;

/// Rows moved by PageUp/PageDown
const PAGE_ROWS: isize = 10;

/// Handle keyboard input
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.model.ui.should_quit = true;
        return Ok(());
    }

    // Permission prompt
    if let Some(prompt) = app.model.ui.permission_prompt.as_mut() {
        let last = PromptChoice::ALL.len() - 1;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                prompt.selected = prompt.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                prompt.selected = (prompt.selected + 1).min(last);
            }
            KeyCode::Enter => {
                let choice = prompt.choice();
                app.answer_permission_prompt(choice);
            }
            KeyCode::Char('a') => app.answer_permission_prompt(PromptChoice::Allow),
            KeyCode::Char('d') => app.answer_permission_prompt(PromptChoice::Deny),
            KeyCode::Char('D') => app.answer_permission_prompt(PromptChoice::DenyDontAskAgain),
            // Dismissing the prompt counts as a denial
            KeyCode::Esc => app.answer_permission_prompt(PromptChoice::Deny),
            _ => {}
        }
        return Ok(());
    }

    // Rationale dialog
    if app.model.ui.rationale_dialog.is_some() {
        match key.code {
            KeyCode::Enter | KeyCode::Char('o') | KeyCode::Char('y') => app.accept_rationale(),
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('n') => app.dismiss_rationale(),
            _ => {}
        }
        return Ok(());
    }

    // Permission denied dialog
    if app.model.ui.settings_dialog.is_some() {
        match key.code {
            KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('y') => app.go_to_settings(),
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('n') => {
                app.dismiss_settings_dialog()
            }
            _ => {}
        }
        return Ok(());
    }

    // Settings panel
    if app.model.ui.settings_panel.is_some() {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.settings_select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.settings_select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_grant(),
            KeyCode::Char('r') => app.reset_selected_grant(),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => app.close_settings_panel(),
            _ => {}
        }
        return Ok(());
    }

    let vim_mode = app.model.ui.vim_mode;
    let waiting_for_g = app.model.ui.vim_command_state == VimCommandState::WaitingForSecondG;
    app.model.ui.vim_command_state = VimCommandState::None;

    match key.code {
        KeyCode::Char('q') => {
            app.model.ui.should_quit = true;
        }
        KeyCode::Char('s') => {
            app.open_settings_panel();
        }
        KeyCode::Char('p') => {
            // Ask again after the rationale was cancelled
            let denied = app
                .model
                .screen
                .as_ref()
                .map(|s| s.permission_state() == PermissionState::Denied)
                .unwrap_or(false);
            if denied {
                app.run_permission_check();
            }
        }
        KeyCode::Char(c @ '1'..='5') if app.model.screen.is_none() => {
            let index = (c as usize) - ('1' as usize);
            app.model.ui.home_selection = index;
            app.open_screen(MediaCategory::ALL[index]);
        }
        // Vim keybindings with Ctrl modifiers (check before plain letters)
        KeyCode::Char('d') if vim_mode && key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.page_by(PAGE_ROWS / 2);
        }
        KeyCode::Char('u') if vim_mode && key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.page_by(-PAGE_ROWS / 2);
        }
        KeyCode::Char('f') if vim_mode && key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.page_by(PAGE_ROWS);
        }
        KeyCode::Char('b') if vim_mode && key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.page_by(-PAGE_ROWS);
        }
        KeyCode::Char('h') if vim_mode => app.go_back(),
        KeyCode::Char('j') if vim_mode => app.next_item(),
        KeyCode::Char('k') if vim_mode => app.previous_item(),
        KeyCode::Char('l') if vim_mode => app.enter(),
        KeyCode::Char('g') if vim_mode => {
            if waiting_for_g {
                app.jump_to_first();
            } else {
                app.model.ui.vim_command_state = VimCommandState::WaitingForSecondG;
            }
        }
        KeyCode::Char('G') if vim_mode => app.jump_to_last(),
        KeyCode::PageDown => app.page_by(PAGE_ROWS),
        KeyCode::PageUp => app.page_by(-PAGE_ROWS),
        KeyCode::Home => app.jump_to_first(),
        KeyCode::End => app.jump_to_last(),
        KeyCode::Up => app.previous_item(),
        KeyCode::Down => app.next_item(),
        KeyCode::Right | KeyCode::Enter => app.enter(),
        KeyCode::Left | KeyCode::Backspace | KeyCode::Esc => app.go_back(),
        _ => {}
    }

    Ok(())
}
