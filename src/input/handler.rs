use crate::app::AppState;
use crate::domain::{UiMode, ViewMode};
use crate::editor::CaptureField;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Searching => handle_search_mode(app, key),
        UiMode::Editing => handle_editor_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // View-independent keys first
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        // View switch
        KeyCode::Tab => {
            let next = match app.view {
                ViewMode::Today => ViewMode::Calendar,
                ViewMode::Calendar => ViewMode::Today,
            };
            app.set_view(next);
            return Ok(false);
        }
        KeyCode::Char('1') => {
            app.set_view(ViewMode::Today);
            return Ok(false);
        }
        KeyCode::Char('2') => {
            app.set_view(ViewMode::Calendar);
            return Ok(false);
        }

        // Toggle side panel
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.toggle_sidebar();
            return Ok(false);
        }

        // Search and tag filter
        KeyCode::Char('/') => {
            app.start_search();
            return Ok(false);
        }
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.cycle_tag_filter();
            return Ok(false);
        }

        // Undo last delete
        KeyCode::Char('u') | KeyCode::Char('U') => {
            app.undo_delete()?;
            return Ok(false);
        }

        // Add task
        KeyCode::Char('a') => {
            match app.view {
                ViewMode::Today => app.open_new_task(),
                ViewMode::Calendar => app.open_new_task_for_cursor(),
            }
            return Ok(false);
        }

        // Edit
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.open_edit_selected();
            return Ok(false);
        }

        _ => {}
    }

    match app.view {
        ViewMode::Today => handle_today_keys(app, key),
        ViewMode::Calendar => handle_calendar_keys(app, key),
    }
}

fn handle_today_keys(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up => app.move_selection_up(),
        KeyCode::Down => app.move_selection_down(),

        KeyCode::Enter => app.open_edit_selected(),

        // Delete selected task
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected()?;
        }

        _ => {}
    }
    Ok(false)
}

fn handle_calendar_keys(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Left => app.calendar_prev_day(),
        KeyCode::Right => app.calendar_next_day(),
        KeyCode::Up => app.calendar_prev_week(),
        KeyCode::Down => app.calendar_next_week(),

        // Month stepping
        KeyCode::Char('[') | KeyCode::Char('p') | KeyCode::Char('P') => {
            app.calendar_prev_month();
        }
        KeyCode::Char(']') | KeyCode::Char('n') | KeyCode::Char('N') => {
            app.calendar_next_month();
        }

        // New task pre-filled with the selected day
        KeyCode::Enter => app.open_new_task_for_cursor(),

        _ => {}
    }
    Ok(false)
}

/// Handle keys while typing a search term
fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.finish_search(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Backspace => app.search_backspace(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while the task editor modal is open
fn handle_editor_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Dictation toggles carry the Alt modifier so plain letters keep typing
    if key.modifiers.contains(KeyModifiers::ALT) {
        let field = match key.code {
            KeyCode::Char('t') => Some(CaptureField::Title),
            KeyCode::Char('d') => Some(CaptureField::Description),
            _ => None,
        };
        if let Some(field) = field {
            if let Some(editor) = app.editor.as_mut() {
                editor.toggle_capture(field, app.dictation.as_mut());
            }
            return Ok(false);
        }
    }

    match key.code {
        KeyCode::Enter => {
            app.submit_editor()?;
        }
        KeyCode::Esc => app.cancel_editor(),
        KeyCode::Tab => {
            if let Some(editor) = app.editor.as_mut() {
                editor.focus_next();
            }
        }
        KeyCode::Backspace => {
            if let Some(editor) = app.editor.as_mut() {
                editor.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(editor) = app.editor.as_mut() {
                editor.insert_char(c);
            }
        }
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::mock::MockAudio;
    use crate::dictation::mock::ScriptedDictation;
    use crate::domain::{local_today, TaskFields};
    use crate::notify::mock::MockNotifier;
    use crate::persistence::MemoryStore;
    use crate::reminder::ReminderScheduler;
    use crate::repository::TaskRepository;

    fn create_test_app() -> AppState {
        let repository = TaskRepository::load(Box::new(MemoryStore::new()));
        let scheduler =
            ReminderScheduler::new(Box::new(MockNotifier::granted()), Box::new(MockAudio::new()));
        AppState::new(repository, scheduler, Box::new(ScriptedDictation::new()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn alt(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT)
    }

    fn seed_task(app: &mut AppState, title: &str) {
        let fields = TaskFields {
            title: title.to_string(),
            ..TaskFields::blank(local_today())
        };
        app.repository.create(fields).unwrap();
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        assert!(handle_key(&mut app, key(KeyCode::Char('q'))).unwrap());
    }

    #[test]
    fn test_view_switch() {
        let mut app = create_test_app();
        assert_eq!(app.view, ViewMode::Today);

        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.view, ViewMode::Calendar);

        handle_key(&mut app, key(KeyCode::Char('1'))).unwrap();
        assert_eq!(app.view, ViewMode::Today);
    }

    #[test]
    fn test_add_and_submit_task_via_keys() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Editing);

        for c in "Tea".chars() {
            handle_key(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.repository.tasks().len(), 1);
        assert_eq!(app.repository.tasks()[0].title, "Tea");
    }

    #[test]
    fn test_submit_without_title_stays_open() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Editing);
        assert!(app.repository.tasks().is_empty());
    }

    #[test]
    fn test_delete_and_undo_via_keys() {
        let mut app = create_test_app();
        seed_task(&mut app, "Doomed");

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert!(app.repository.tasks().is_empty());

        handle_key(&mut app, key(KeyCode::Char('u'))).unwrap();
        assert_eq!(app.repository.tasks().len(), 1);
    }

    #[test]
    fn test_search_mode_round_trip() {
        let mut app = create_test_app();
        seed_task(&mut app, "Alpha");
        seed_task(&mut app, "Beta");

        handle_key(&mut app, key(KeyCode::Char('/'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Searching);

        for c in "beta".chars() {
            handle_key(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.search_term, "beta");
        assert_eq!(app.visible_today().len(), 1);

        // Esc from search clears the term entirely
        handle_key(&mut app, key(KeyCode::Char('/'))).unwrap();
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.search_term, "");
    }

    #[test]
    fn test_calendar_month_stepping() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('2'))).unwrap();

        let before = app.cursor_date;
        handle_key(&mut app, key(KeyCode::Char(']'))).unwrap();
        assert_ne!(app.cursor_date, before);

        handle_key(&mut app, key(KeyCode::Char('['))).unwrap();
        assert_eq!(app.cursor_date, before);
    }

    #[test]
    fn test_calendar_enter_opens_prefilled_editor() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('2'))).unwrap();
        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        let cursor = app.cursor_date;

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        let editor = app.editor.as_ref().unwrap();
        assert_eq!(editor.date_input, cursor.format("%Y-%m-%d").to_string());
    }

    #[test]
    fn test_dictation_toggle_keys() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();

        handle_key(&mut app, alt('t')).unwrap();
        assert!(app.dictation.is_capturing());

        handle_key(&mut app, alt('d')).unwrap();
        assert!(app.dictation.is_capturing());

        handle_key(&mut app, alt('d')).unwrap();
        assert!(!app.dictation.is_capturing());

        // Plain letters still type into the focused field
        handle_key(&mut app, key(KeyCode::Char('z'))).unwrap();
        assert_eq!(app.editor.as_ref().unwrap().title, "z");
    }

    #[test]
    fn test_escape_cancels_editor() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        handle_key(&mut app, key(KeyCode::Esc)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.repository.tasks().is_empty());
    }
}
