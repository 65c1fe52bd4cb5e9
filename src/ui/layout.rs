use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Terminal lines taken by one grid row (thumbnail cells)
pub const GRID_ROW_HEIGHT: u16 = 6;

/// Terminal lines taken by one label row (two text lines and a gap)
pub const LABEL_ROW_HEIGHT: u16 = 3;

/// Layout information for rendering
pub struct LayoutInfo {
    /// Top heading bar
    pub title_area: Rect,
    /// Home list or media list
    pub content_area: Rect,
    /// Hotkey legend area (full width)
    pub legend_area: Option<Rect>,
    /// Bottom status bar area
    pub status_area: Rect,
}

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, legend_height: u16) -> LayoutInfo {
    // Drop the legend first when the terminal is short
    let legend_height = if terminal_size.height >= 12 { legend_height } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Heading (top border, text, bottom border)
            Constraint::Min(3),                // Content
            Constraint::Length(legend_height), // Legend
            Constraint::Length(3),             // Status bar
        ])
        .split(terminal_size);

    LayoutInfo {
        title_area: chunks[0],
        content_area: chunks[1],
        legend_area: (legend_height > 0).then_some(chunks[2]),
        status_area: chunks[3],
    }
}

/// How many list rows fit into `height` lines (at least one)
pub fn visible_rows(height: u16, row_height: u16) -> usize {
    (height / row_height.max(1)).max(1) as usize
}

/// Centered rectangle of at most `width` x `height` inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
