use crate::dictation::Dictation;
use crate::domain::{local_today, step_month, visible_tasks, Tag, Task, UiMode, ViewMode};
use crate::editor::EditorState;
use crate::reminder::ReminderScheduler;
use crate::repository::TaskRepository;
use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use uuid::Uuid;

/// Main application state
pub struct AppState {
    pub repository: TaskRepository,
    pub scheduler: ReminderScheduler,
    pub dictation: Box<dyn Dictation>,
    pub view: ViewMode,
    pub ui_mode: UiMode,
    /// `Some` while the task editor modal is open
    pub editor: Option<EditorState>,
    pub search_term: String,
    pub tag_filter: Option<Tag>,
    /// Selection in the today list (index into the visible subset)
    pub selected_index: usize,
    /// Selected day in the calendar view; its month is the displayed month
    pub cursor_date: NaiveDate,
    pub sidebar_open: bool,
}

impl AppState {
    pub fn new(
        repository: TaskRepository,
        scheduler: ReminderScheduler,
        dictation: Box<dyn Dictation>,
    ) -> Self {
        Self {
            repository,
            scheduler,
            dictation,
            view: ViewMode::Today,
            ui_mode: UiMode::Normal,
            editor: None,
            search_term: String::new(),
            tag_filter: None,
            selected_index: 0,
            cursor_date: local_today(),
            sidebar_open: true,
        }
    }

    /// The visible subset for the today view, computed against the local
    /// date at this instant
    pub fn visible_today(&self) -> Vec<&Task> {
        visible_tasks(
            self.repository.tasks(),
            &self.search_term,
            self.tag_filter,
            local_today(),
        )
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_today().into_iter().nth(self.selected_index)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let count = self.visible_today().len();
        if count > 0 && self.selected_index < count - 1 {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_today().len();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
        if view == ViewMode::Calendar {
            self.cursor_date = local_today();
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Cycle the tag filter: all -> Work -> Personal -> all
    pub fn cycle_tag_filter(&mut self) {
        self.tag_filter = match self.tag_filter {
            None => Some(Tag::Work),
            Some(Tag::Work) => Some(Tag::Personal),
            Some(Tag::Personal) => None,
        };
        self.clamp_selection();
    }

    pub fn start_search(&mut self) {
        self.ui_mode = UiMode::Searching;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_term.push(c);
        self.clamp_selection();
    }

    pub fn search_backspace(&mut self) {
        self.search_term.pop();
        self.clamp_selection();
    }

    pub fn finish_search(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.ui_mode = UiMode::Normal;
        self.clamp_selection();
    }

    // Calendar navigation. Day steps may cross month boundaries; month
    // steps clamp day-of-month overflow.
    pub fn calendar_prev_day(&mut self) {
        self.cursor_date -= Duration::days(1);
    }

    pub fn calendar_next_day(&mut self) {
        self.cursor_date += Duration::days(1);
    }

    pub fn calendar_prev_week(&mut self) {
        self.cursor_date -= Duration::days(7);
    }

    pub fn calendar_next_week(&mut self) {
        self.cursor_date += Duration::days(7);
    }

    pub fn calendar_prev_month(&mut self) {
        self.cursor_date = step_month(self.cursor_date, -1);
    }

    pub fn calendar_next_month(&mut self) {
        self.cursor_date = step_month(self.cursor_date, 1);
    }

    /// Open the editor with an empty draft
    pub fn open_new_task(&mut self) {
        self.mount_editor(EditorState::new_blank(local_today()));
    }

    /// Open the editor pre-filled with the calendar-selected date
    pub fn open_new_task_for_cursor(&mut self) {
        self.mount_editor(EditorState::for_date(self.cursor_date));
    }

    /// Open the editor pre-populated from the selected task
    pub fn open_edit_selected(&mut self) {
        let editor = match self.view {
            ViewMode::Today => self.selected_task().map(EditorState::from_task),
            ViewMode::Calendar => {
                let day = self.cursor_date;
                self.repository
                    .tasks()
                    .iter()
                    .find(|t| t.date == day)
                    .map(EditorState::from_task)
            }
        };
        if let Some(editor) = editor {
            self.mount_editor(editor);
        }
    }

    fn mount_editor(&mut self, editor: EditorState) {
        // Permission is requested eagerly at editor-mount time, whether or
        // not a reminder ends up set
        self.scheduler.request_permission();
        self.editor = Some(editor);
        self.ui_mode = UiMode::Editing;
    }

    /// Submit the draft: commit through the repository, arm the reminder,
    /// close the editor. A rejected draft keeps the editor open.
    pub fn submit_editor(&mut self) -> Result<()> {
        let editor = match self.editor.as_mut() {
            Some(editor) => editor,
            None => return Ok(()),
        };

        let op = match editor.submit() {
            Ok(op) => op,
            Err(_) => return Ok(()),
        };

        if self.dictation.is_capturing() {
            self.dictation.stop_capture();
        }

        let task = self.repository.save(op)?;
        self.scheduler.arm(&task, Local::now().naive_local());

        self.editor = None;
        self.ui_mode = UiMode::Normal;
        self.clamp_selection();
        Ok(())
    }

    /// Discard the draft unconditionally
    pub fn cancel_editor(&mut self) {
        if self.dictation.is_capturing() {
            self.dictation.stop_capture();
        }
        self.editor = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Delete the selected task and revoke its pending reminder
    pub fn delete_selected(&mut self) -> Result<()> {
        let id = match self.selected_task().map(|t| t.id) {
            Some(id) => id,
            None => return Ok(()),
        };
        self.delete_task(id)
    }

    pub fn delete_task(&mut self, id: Uuid) -> Result<()> {
        if self.repository.delete(id)?.is_some() {
            self.scheduler.cancel(id);
        }
        self.clamp_selection();
        Ok(())
    }

    /// Restore the most recently deleted task, once
    pub fn undo_delete(&mut self) -> Result<()> {
        self.repository.undo_delete()?;
        Ok(())
    }

    /// Per-tick work: stream dictation into the open draft and fire any
    /// due reminders
    pub fn tick(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.apply_transcript(self.dictation.as_ref());
        }
        self.scheduler.poll(Local::now().naive_local());
    }
}
