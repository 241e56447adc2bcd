use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{
    border_style, default_style, hint_style, selected_style, tag_style, title_style,
    undo_hint_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the today list: filter bar, undo hint and task rows
pub fn render_today_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();

    // Filter bar
    let search_label = if app.ui_mode == UiMode::Searching {
        format!("Search: {}█", app.search_term)
    } else if app.search_term.is_empty() {
        String::from("Search: (press / to search)")
    } else {
        format!("Search: {}", app.search_term)
    };
    let tag_label = match app.tag_filter {
        Some(tag) => format!("Tag: {}", tag.name()),
        None => String::from("Tag: All"),
    };
    lines.push(Line::from(vec![
        Span::styled(search_label, default_style()),
        Span::raw("   "),
        Span::styled(tag_label, tag_style()),
    ]));

    // Undo hint while a deleted task is recoverable
    if app.repository.has_pending_undo() {
        lines.push(Line::from(Span::styled(
            " Press u to undo delete ",
            undo_hint_style(),
        )));
    }
    lines.push(Line::raw(""));

    let visible = app.visible_today();
    if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            "No tasks. Press a to add one.",
            hint_style(),
        )));
    }

    for (idx, task) in visible.iter().enumerate() {
        let row_style = if idx == app.selected_index {
            selected_style()
        } else {
            default_style()
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", task.title), row_style),
            Span::styled(
                format!("{} · {}", task.time.format("%H:%M"), task.tag.name()),
                tag_style(),
            ),
        ]));

        if !task.description.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("   {}", task.description),
                hint_style(),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Today's Tasks ", title_style())),
    );

    f.render_widget(paragraph, area);
}
