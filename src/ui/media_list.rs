use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use ratatui_image::StatefulImage;
use unicode_width::UnicodeWidthStr;

use mediamaster::adapter::{GridHolder, LabelHolder, Recycler, SlotTarget, ViewHolder, ViewType};
use mediamaster::logic::grouping::GRID_COLUMNS;
use mediamaster::logic::navigation::visible_range;
use mediamaster::model::ScreenModel;
use mediamaster::permissions::PermissionState;

use super::icons::IconRenderer;
use super::layout::{visible_rows, GRID_ROW_HEIGHT, LABEL_ROW_HEIGHT};
use crate::app::thumbnails::{ThumbnailState, Thumbnails};

/// Render the open media screen's list
///
/// Lays out the recycler for the visible window first, then draws every
/// attached holder at its position.
pub fn render_media_list(
    f: &mut Frame,
    area: Rect,
    screen: &mut ScreenModel,
    recycler: &mut Recycler,
    thumbnails: &mut Thumbnails,
    icon_renderer: &IconRenderer,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(vec![
            Span::raw(" "),
            icon_renderer.category_icon(screen.category),
            Span::raw(format!("{} ", screen.category.token())),
        ]))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if screen.row_count() == 0 {
        // The progress dialog covers the loading case
        if !screen.is_loading() {
            render_empty_state(f, inner, screen.permission_state());
        }
        return;
    }

    // Rows of one screen share a template
    let row_height = screen
        .adapter
        .view_type(0)
        .map_or(LABEL_ROW_HEIGHT, row_height_for);
    let visible = visible_rows(inner.height, row_height);
    screen.update_scroll(visible);
    let offset = screen.scroll_offset;

    let range = visible_range(offset, visible, screen.row_count());
    recycler.layout(&screen.adapter, range, &mut *thumbnails);

    for (position, holder) in recycler.attached() {
        let y = inner.y + (position - offset) as u16 * row_height;
        let height = row_height.min((inner.y + inner.height).saturating_sub(y));
        if height == 0 {
            continue;
        }
        let row_area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height,
        };
        let selected = screen.selected == Some(position);

        match holder {
            ViewHolder::Grid(grid) => {
                render_grid_row(f, row_area, grid, selected, thumbnails, icon_renderer)
            }
            ViewHolder::Label(label) => render_label_row(f, row_area, label, selected, icon_renderer),
        }
    }
}

fn render_grid_row(
    f: &mut Frame,
    area: Rect,
    holder: &GridHolder,
    selected: bool,
    thumbnails: &mut Thumbnails,
    icon_renderer: &IconRenderer,
) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
        .split(area);

    let border_color = if selected { Color::Yellow } else { Color::DarkGray };

    for (slot, view) in holder.slots.iter().enumerate() {
        if view.is_empty() {
            continue;
        }

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));
        if view.video_badge {
            block = block.title(icon_renderer.video_badge());
        }
        let inner = block.inner(cells[slot]);
        f.render_widget(block, cells[slot]);

        let target = SlotTarget {
            holder: holder.id,
            slot,
        };
        match thumbnails.slot_state(target) {
            Some(ThumbnailState::Ready(protocol)) => {
                f.render_stateful_widget(StatefulImage::default(), inner, protocol);
            }
            Some(ThumbnailState::Failed) => {
                render_glyph(f, inner, icon_renderer.fallback());
            }
            Some(ThumbnailState::Loading) | None => {
                render_glyph(f, inner, icon_renderer.placeholder());
            }
        }
    }
}

fn render_glyph(f: &mut Frame, area: Rect, glyph: Span<'static>) {
    if area.height == 0 {
        return;
    }
    let middle = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    f.render_widget(Paragraph::new(Line::from(glyph)).alignment(Alignment::Center), middle);
}

fn render_label_row(
    f: &mut Frame,
    area: Rect,
    holder: &LabelHolder,
    selected: bool,
    icon_renderer: &IconRenderer,
) {
    let max_width = area.width.saturating_sub(4) as usize;
    let icon = holder
        .icon
        .map(|icon| icon_renderer.label_icon(icon))
        .unwrap_or_else(|| Span::raw("  "));

    let name_style = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            icon,
            Span::styled(truncate(&holder.name_line, max_width), name_style),
        ]),
        Line::from(vec![
            Span::raw("   "),
            Span::styled(
                truncate(&holder.detail_line, max_width),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];

    let style = if selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };
    f.render_widget(Paragraph::new(lines).style(style), area);
}

fn render_empty_state(f: &mut Frame, area: Rect, state: PermissionState) {
    let message = match state {
        PermissionState::Granted => "Nothing here yet",
        PermissionState::Denied => "Permission denied. Press p to ask again.",
        PermissionState::PermanentlyDenied => "Permission denied. Press s to open settings.",
        PermissionState::Unchecked
        | PermissionState::Checking
        | PermissionState::AwaitingRationale => "Waiting for permission...",
    };

    let middle = Rect {
        y: area.y + area.height / 2,
        height: 1.min(area.height),
        ..area
    };
    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        middle,
    );
}

/// Cut `text` to `max_width` terminal columns, marking the cut with an ellipsis
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

fn row_height_for(view_type: ViewType) -> u16 {
    if view_type.uses_label_template() {
        LABEL_ROW_HEIGHT
    } else {
        GRID_ROW_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_height_follows_template() {
        assert_eq!(row_height_for(ViewType::ImageVideo), GRID_ROW_HEIGHT);
        assert_eq!(row_height_for(ViewType::Contact), LABEL_ROW_HEIGHT);
        assert_eq!(row_height_for(ViewType::Audio), LABEL_ROW_HEIGHT);
        assert_eq!(row_height_for(ViewType::Document), LABEL_ROW_HEIGHT);
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("File: a.mp3", 20), "File: a.mp3");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("File: a-very-long-name.ogg", 10), "File: a-v…");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK character takes two columns
        assert_eq!(truncate("名前名前名前", 5), "名前…");
    }
}
