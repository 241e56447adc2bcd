use crate::app::AppState;
use crate::domain::{UiMode, ViewMode};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Render the one-row keybinding hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let hints = match app.ui_mode {
        UiMode::Editing => {
            "Tab field · Enter save · Esc cancel · Alt+t/Alt+d dictate · Space cycle"
        }
        UiMode::Searching => "type to search · Enter done · Esc clear",
        UiMode::Normal => match app.view {
            ViewMode::Today => {
                "a add · e edit · x delete · u undo · / search · f filter · Tab view · q quit"
            }
            ViewMode::Calendar => {
                "arrows day · [/] month · Enter add on day · e edit · Tab view · q quit"
            }
        },
    };

    let paragraph = Paragraph::new(Line::raw(hints)).style(hint_style());
    f.render_widget(paragraph, area);
}
