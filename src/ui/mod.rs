pub mod calendar_pane;
pub mod editor_form;
pub mod keybindings;
pub mod layout;
pub mod sidebar;
pub mod styles;
pub mod today_pane;

use crate::app::AppState;
use crate::domain::ViewMode;
use calendar_pane::render_calendar_pane;
use editor_form::render_editor_form;
use keybindings::render_keybindings;
use layout::create_layout;
use ratatui::Frame;
use sidebar::render_sidebar;
use today_pane::render_today_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.sidebar_open);

    render_keybindings(f, app, layout.keybindings_area);

    if let Some(sidebar_area) = layout.sidebar_area {
        render_sidebar(f, app, sidebar_area);
    }

    match app.view {
        ViewMode::Today => render_today_pane(f, app, layout.main_area),
        ViewMode::Calendar => render_calendar_pane(f, app, layout.main_area),
    }

    // Editor modal on top of everything
    if app.editor.is_some() {
        render_editor_form(f, app, size);
    }
}
