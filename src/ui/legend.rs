use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use mediamaster::permissions::PermissionState;

/// Build hotkey spans (extracted for testability)
///
/// `permission` is `None` on the home screen.
fn build_hotkey_spans(vim_mode: bool, permission: Option<PermissionState>) -> Vec<Span<'static>> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let mut hotkey_spans = vec![];

    // Navigation keys (different for vim mode)
    if vim_mode {
        hotkey_spans.extend(vec![
            key("hjkl"),
            Span::raw(":Nav  "),
            key("gg/G"),
            Span::raw(":First/Last  "),
            key("^d/^u"),
            Span::raw(":½Page  "),
        ]);
    } else {
        hotkey_spans.extend(vec![
            key("↑/↓"),
            Span::raw(":Nav  "),
            key("PgUp/PgDn"),
            Span::raw(":Page  "),
        ]);
    }

    match permission {
        None => {
            hotkey_spans.extend(vec![
                key("Enter"),
                Span::raw(":Open  "),
                key("1-5"),
                Span::raw(":Jump  "),
            ]);
        }
        Some(state) => {
            hotkey_spans.extend(vec![key("Esc"), Span::raw(":Back  ")]);
            if state == PermissionState::Denied {
                hotkey_spans.extend(vec![key("p"), Span::raw(":Ask Again  ")]);
            }
        }
    }

    hotkey_spans.extend(vec![
        key("s"),
        Span::raw(":Permissions  "),
        key("q"),
        Span::raw(":Quit"),
    ]);

    hotkey_spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(
    vim_mode: bool,
    permission: Option<PermissionState>,
) -> Paragraph<'static> {
    Paragraph::new(vec![Line::from(build_hotkey_spans(vim_mode, permission))])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

/// Render the hotkey legend
pub fn render_legend(
    f: &mut Frame,
    area: Rect,
    vim_mode: bool,
    permission: Option<PermissionState>,
) {
    f.render_widget(build_legend_paragraph(vim_mode, permission), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(
    terminal_width: u16,
    vim_mode: bool,
    permission: Option<PermissionState>,
) -> u16 {
    // Count without the block; line_count() doesn't account for borders
    let paragraph_for_counting =
        Paragraph::new(vec![Line::from(build_hotkey_spans(vim_mode, permission))])
            .wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    (line_count as u16).saturating_add(2).max(3)
}
