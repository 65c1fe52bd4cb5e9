use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use mediamaster::MediaCategory;

use super::icons::IconRenderer;

/// Render the category list of the home screen
pub fn render_home(f: &mut Frame, area: Rect, selected: usize, icon_renderer: &IconRenderer) {
    let items: Vec<ListItem> = MediaCategory::ALL
        .iter()
        .enumerate()
        .map(|(idx, category)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", idx + 1), Style::default().fg(Color::DarkGray)),
                icon_renderer.category_icon(*category),
                Span::raw(category.token()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Browse ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("► ");

    let mut state = ListState::default();
    state.select(Some(selected.min(MediaCategory::ALL.len() - 1)));
    f.render_stateful_widget(list, area, &mut state);
}
