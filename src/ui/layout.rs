use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub sidebar_area: Option<Rect>,
    pub main_area: Rect,
    pub keybindings_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Main area: side panel (when open) | active view
pub fn create_layout(area: Rect, sidebar_open: bool) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    let keybindings_area = main_chunks[0];
    let content_area = main_chunks[1];

    if sidebar_open {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(20), // Side panel
                Constraint::Min(0),     // Active view
            ])
            .split(content_area);

        MainLayout {
            sidebar_area: Some(horizontal[0]),
            main_area: horizontal[1],
            keybindings_area,
        }
    } else {
        MainLayout {
            sidebar_area: None,
            main_area: content_area,
            keybindings_area,
        }
    }
}

/// Create centered modal area (for the task editor)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Length(22),
            Constraint::Percentage(15),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
