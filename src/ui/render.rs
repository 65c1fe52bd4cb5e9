use crate::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use mediamaster::permissions::settings_uri;

use super::{dialogs, home, layout, legend, media_list, status_bar, toast};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let vim_mode = app.model.ui.vim_mode;
    let permission = app.model.screen.as_ref().map(|s| s.permission_state());
    let legend_height = legend::calculate_legend_height(size.width, vim_mode, permission);
    let layout_info = layout::calculate_layout(size, legend_height);

    render_title(f, layout_info.title_area, app);

    // Fetch before borrowing the model for the list
    let selected_date = app.selected_date();

    let App {
        model,
        recycler,
        thumbnails,
        icon_renderer,
        grants,
        package_name,
        ..
    } = app;

    match model.screen.as_mut() {
        Some(screen) => media_list::render_media_list(
            f,
            layout_info.content_area,
            screen,
            recycler,
            thumbnails,
            icon_renderer,
        ),
        None => home::render_home(
            f,
            layout_info.content_area,
            model.ui.home_selection,
            icon_renderer,
        ),
    }

    if let Some(legend_area) = layout_info.legend_area {
        legend::render_legend(f, legend_area, vim_mode, permission);
    }

    let screen_status = model.screen.as_ref().map(|screen| status_bar::ScreenStatus {
        category: screen.category,
        row_count: screen.row_count(),
        entry_count: screen.entry_count(),
        permission: screen.permission_state(),
        selected: screen.selected,
        selected_date: selected_date.as_deref(),
    });
    status_bar::render_status_bar(f, layout_info.status_area, screen_status.as_ref());

    // Dialogs, lowest first
    if let Some(started) = model.screen.as_ref().and_then(|s| s.loading_since) {
        dialogs::render_progress(f, started);
    }
    if let Some(prompt) = &model.ui.permission_prompt {
        dialogs::render_permission_prompt(f, prompt, package_name);
    }
    if let Some(category) = model.ui.rationale_dialog {
        dialogs::render_rationale(f, category);
    }
    if model.ui.settings_dialog.is_some() {
        dialogs::render_settings_prompt(f);
    }
    if let Some(panel) = model.ui.settings_panel {
        let summaries = grants.summaries().unwrap_or_default();
        dialogs::render_settings_panel(
            f,
            &settings_uri(package_name),
            &summaries,
            panel.selected,
        );
    }

    // Render toast notification if active
    if let Some((message, _timestamp)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        "MediaMaster",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if let Some(screen) = &app.model.screen {
        spans.push(Span::raw(" › "));
        spans.push(app.icon_renderer.category_icon(screen.category));
        spans.push(Span::raw(screen.category.token()));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}
