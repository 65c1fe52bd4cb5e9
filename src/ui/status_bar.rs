use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use mediamaster::permissions::PermissionState;
use mediamaster::MediaCategory;

/// What the status bar shows for an open media screen
pub struct ScreenStatus<'a> {
    pub category: MediaCategory,
    pub row_count: usize,
    pub entry_count: usize,
    pub permission: PermissionState,
    pub selected: Option<usize>,
    /// Formatted `date_added` of the selected entry
    pub selected_date: Option<&'a str>,
}

/// Build the status text; sections are separated by " | "
pub fn build_status_line(screen: Option<&ScreenStatus>) -> String {
    let Some(screen) = screen else {
        return format!("Categories: {} | Enter to open", MediaCategory::ALL.len());
    };

    let mut metrics = vec![
        format!("Category: {}", screen.category.token()),
        format!("Rows: {}", screen.row_count),
        format!("Items: {}", screen.entry_count),
        format!("Permission: {}", screen.permission.label()),
    ];

    if let Some(selected) = screen.selected {
        metrics.push(format!("Row: {}/{}", selected + 1, screen.row_count));
    }
    if let Some(date) = screen.selected_date {
        metrics.push(format!("Added: {}", date));
    }

    metrics.join(" | ")
}

/// Render the bottom status bar
pub fn render_status_bar(f: &mut Frame, area: Rect, screen: Option<&ScreenStatus>) {
    let status_line = build_status_line(screen);

    // Color the labels (before colons)
    let mut spans = vec![];
    for (idx, part) in status_line.split(" | ").enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" | "));
        }
        if let Some(colon_pos) = part.find(':') {
            let label = &part[..=colon_pos];
            let value = &part[colon_pos + 1..];
            let value_style = if part.starts_with("Permission: Denied") {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            spans.push(Span::styled(label.to_string(), Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(value.to_string(), value_style));
        } else {
            spans.push(Span::raw(part.to_string()));
        }
    }

    let status_bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(status_bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_status() {
        assert_eq!(build_status_line(None), "Categories: 5 | Enter to open");
    }

    #[test]
    fn test_screen_status_with_selection() {
        let status = ScreenStatus {
            category: MediaCategory::Image,
            row_count: 3,
            entry_count: 10,
            permission: PermissionState::Granted,
            selected: Some(1),
            selected_date: Some("2024-05-01 10:00"),
        };
        assert_eq!(
            build_status_line(Some(&status)),
            "Category: IMAGES | Rows: 3 | Items: 10 | Permission: Granted | Row: 2/3 | Added: 2024-05-01 10:00"
        );
    }

    #[test]
    fn test_screen_status_denied_without_rows() {
        let status = ScreenStatus {
            category: MediaCategory::Contact,
            row_count: 0,
            entry_count: 0,
            permission: PermissionState::PermanentlyDenied,
            selected: None,
            selected_date: None,
        };
        assert_eq!(
            build_status_line(Some(&status)),
            "Category: CONTACTS | Rows: 0 | Items: 0 | Permission: Denied (settings)"
        );
    }
}
