use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

use mediamaster::model::{PermissionPromptState, PromptChoice};
use mediamaster::permissions::{GrantStatus, GrantSummary};
use mediamaster::MediaCategory;

use super::layout::centered_rect;

/// Render the permission prompt (Allow / Deny / Deny and don't ask again)
pub fn render_permission_prompt(f: &mut Frame, prompt: &PermissionPromptState, app_name: &str) {
    let permissions = prompt
        .request
        .permissions
        .iter()
        .map(|p| p.label())
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        Line::from(format!("Allow {} to access:", app_name)),
        Line::from(Span::styled(
            permissions,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (idx, choice) in PromptChoice::ALL.iter().enumerate() {
        let style = if idx == prompt.selected {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let marker = if idx == prompt.selected { "► " } else { "  " };
        lines.push(Line::from(Span::styled(format!("{}{}", marker, choice.label()), style)));
    }

    let area = centered_rect(f.area(), 56, lines.len() as u16 + 2);
    let dialog = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", prompt.category.token()))
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

/// Render the "Permission Required" rationale dialog
pub fn render_rationale(f: &mut Frame, category: MediaCategory) {
    let text = format!(
        "This app needs access to your {} to function properly.\n\n\
        Enter: OK    Esc: Cancel",
        category.token()
    );

    let area = centered_rect(f.area(), 50, 8);
    let dialog = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Permission Required")
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

/// Render the "Permission Denied" dialog offering to open settings
pub fn render_settings_prompt(f: &mut Frame) {
    let text = "You have denied the permission multiple times. \
        Please go to settings to enable it.\n\n\
        Enter: Go to Settings    Esc: Cancel";

    let area = centered_rect(f.area(), 50, 8);
    let dialog = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Permission Denied")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

/// Render the application permission settings panel
pub fn render_settings_panel(
    f: &mut Frame,
    settings_uri: &str,
    summaries: &[GrantSummary],
    selected: usize,
) {
    let items: Vec<ListItem> = summaries
        .iter()
        .map(|summary| {
            let color = match summary.status {
                GrantStatus::Granted => Color::Green,
                GrantStatus::DeniedForever => Color::Red,
                GrantStatus::Denied => Color::Yellow,
                GrantStatus::NotDetermined => Color::Gray,
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<18}", summary.permission.label())),
                Span::styled(summary.status.label(), Style::default().fg(color)),
                Span::styled(
                    denials_label(summary.denials),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let area = centered_rect(f.area(), 60, summaries.len() as u16 + 6);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" App permissions ({}) ", settings_uri))
                .title_bottom(" Enter:Toggle  r:Reset  Esc:Back ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    let mut state = ListState::default();
    state.select(Some(selected.min(summaries.len().saturating_sub(1))));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

fn denials_label(denials: u32) -> String {
    match denials {
        0 => String::new(),
        1 => "  (denied once)".to_string(),
        n => format!("  (denied {} times)", n),
    }
}

/// Render the "Please wait" indicator shown while a query runs
pub fn render_progress(f: &mut Frame, started: Instant) {
    let spinner = mediamaster::logic::ui::spinner_frame(started.elapsed().as_millis());
    let area = centered_rect(f.area(), 24, 3);
    let dialog = Paragraph::new(format!("{} Please wait", spinner))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denials_label() {
        assert_eq!(denials_label(0), "");
        assert_eq!(denials_label(1), "  (denied once)");
        assert_eq!(denials_label(4), "  (denied 4 times)");
    }
}
