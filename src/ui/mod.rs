// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - icons: Icon rendering (emoji and Nerd Fonts) with themes
// - layout: Calculates screen layout (title, content, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - home: Renders the category list
// - media_list: Renders the open screen's grid or label rows
// - legend: Renders hotkey legend
// - status_bar: Renders bottom status bar with metrics
// - dialogs: Renders permission prompt, rationale, settings and progress dialogs
// - toast: Renders toast notifications (brief pop-up messages)

pub mod dialogs;
pub mod home;
pub mod icons;
pub mod layout;
pub mod legend;
pub mod media_list;
pub mod render;
pub mod status_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
