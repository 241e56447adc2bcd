use crate::app::AppState;
use crate::domain::ViewMode;
use crate::ui::styles::{border_style, default_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the navigation side panel
pub fn render_sidebar(f: &mut Frame, app: &AppState, area: Rect) {
    let entry = |label: &str, active: bool| {
        if active {
            Line::from(Span::styled(format!(" {} ", label), selected_style()))
        } else {
            Line::from(Span::styled(format!(" {} ", label), default_style()))
        }
    };

    let lines = vec![
        Line::raw(""),
        entry("Dashboard", app.view == ViewMode::Today),
        entry("Calendar", app.view == ViewMode::Calendar),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" TaskTide ", title_style())),
    );

    f.render_widget(paragraph, area);
}
