use crate::dictation::Dictation;
use crate::domain::{RepeatType, Tag, Task, TaskFields, WEEK_DAYS};
use crate::repository::SaveOp;
use crate::resource::file_resource;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Fields that can receive dictated speech
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureField {
    Title,
    Description,
}

/// Focusable form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Time,
    Date,
    Tag,
    Reminder,
    Repeat,
    RepeatDays,
    Sound,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Time,
            FormField::Time => FormField::Date,
            FormField::Date => FormField::Tag,
            FormField::Tag => FormField::Reminder,
            FormField::Reminder => FormField::Repeat,
            FormField::Repeat => FormField::RepeatDays,
            FormField::RepeatDays => FormField::Sound,
            FormField::Sound => FormField::Title,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Time => "Time",
            FormField::Date => "Date",
            FormField::Tag => "Tag",
            FormField::Reminder => "Reminder",
            FormField::Repeat => "Repeat",
            FormField::RepeatDays => "Repeat days",
            FormField::Sound => "Sound file",
        }
    }

    /// Whether the field takes free text (as opposed to cycling/toggling)
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Title
                | FormField::Description
                | FormField::Time
                | FormField::Date
                | FormField::Reminder
                | FormField::Sound
        )
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("title is required")]
    EmptyTitle,
    #[error("time must be HH:MM")]
    BadTime,
    #[error("date must be YYYY-MM-DD")]
    BadDate,
    #[error("reminder must be YYYY-MM-DD HH:MM")]
    BadReminder,
}

/// The single in-progress edit buffer.
///
/// Text fields are kept as raw strings while the editor is open (the form is
/// a free-typing surface) and parsed once at submit time; the browser's
/// native time/date widgets played that role in the original.
pub struct EditorState {
    /// `Some` when editing an existing task; its id is preserved on submit
    pub editing_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub time_input: String,
    pub date_input: String,
    pub tag: Tag,
    pub reminder_input: String,
    pub repeat_type: RepeatType,
    pub repeat_days: Vec<String>,
    pub sound_input: String,
    pub focus: FormField,
    /// At most one field captures dictation at a time
    pub active_capture: Option<CaptureField>,
    /// Set after a failed submit; cleared on the next edit
    pub error: Option<SubmitError>,
}

impl EditorState {
    /// Open with an empty draft (new task)
    pub fn new_blank(today: NaiveDate) -> Self {
        Self::from_fields(None, TaskFields::blank(today))
    }

    /// Open pre-filled with a calendar-selected date
    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_fields(None, TaskFields::blank(date))
    }

    /// Open pre-populated from an existing task
    pub fn from_task(task: &Task) -> Self {
        Self::from_fields(Some(task.id), task.fields())
    }

    fn from_fields(editing_id: Option<Uuid>, fields: TaskFields) -> Self {
        Self {
            editing_id,
            title: fields.title,
            description: fields.description,
            time_input: fields.time.format("%H:%M").to_string(),
            date_input: fields.date.format("%Y-%m-%d").to_string(),
            tag: fields.tag,
            reminder_input: fields
                .reminder_time
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            repeat_type: fields.repeat_type,
            repeat_days: fields.repeat_days,
            sound_input: fields.sound_url.unwrap_or_default(),
            focus: FormField::Title,
            active_capture: None,
            error: None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
        // Weekday toggles only apply to daily repeats; the field is hidden
        // and skipped otherwise
        if self.focus == FormField::RepeatDays && self.repeat_type != RepeatType::Daily {
            self.focus = self.focus.next();
        }
    }

    fn text_buffer(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Time => Some(&mut self.time_input),
            FormField::Date => Some(&mut self.date_input),
            FormField::Reminder => Some(&mut self.reminder_input),
            FormField::Sound => Some(&mut self.sound_input),
            _ => None,
        }
    }

    /// Type into the focused field. Non-text fields cycle instead.
    pub fn insert_char(&mut self, c: char) {
        self.error = None;
        match self.focus {
            FormField::Tag => self.cycle_tag(),
            FormField::Repeat => self.cycle_repeat(),
            FormField::RepeatDays => {
                if let Some(digit) = c.to_digit(10) {
                    if (1..=7).contains(&digit) {
                        self.toggle_repeat_day(digit as usize - 1);
                    }
                }
            }
            field => {
                if let Some(buffer) = self.text_buffer(field) {
                    buffer.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        let field = self.focus;
        if let Some(buffer) = self.text_buffer(field) {
            buffer.pop();
        }
    }

    pub fn cycle_tag(&mut self) {
        let all = Tag::all();
        let idx = all.iter().position(|t| *t == self.tag).unwrap_or(0);
        self.tag = all[(idx + 1) % all.len()];
    }

    pub fn cycle_repeat(&mut self) {
        self.repeat_type = self.repeat_type.next();
    }

    /// Flip a weekday in the daily-repeat selection (index into WEEK_DAYS)
    pub fn toggle_repeat_day(&mut self, index: usize) {
        let day = match WEEK_DAYS.get(index) {
            Some(day) => day.to_string(),
            None => return,
        };
        if let Some(pos) = self.repeat_days.iter().position(|d| *d == day) {
            self.repeat_days.remove(pos);
        } else {
            self.repeat_days.push(day);
        }
    }

    /// Toggle dictation capture for a field. Only one field can be captured
    /// at a time: toggling the active field stops capture, and toggling the
    /// other field moves the capture there. Starting always resets the
    /// transcript buffer.
    pub fn toggle_capture(&mut self, field: CaptureField, dictation: &mut dyn Dictation) {
        if self.active_capture == Some(field) && dictation.is_capturing() {
            dictation.stop_capture();
            self.active_capture = None;
        } else {
            dictation.reset_transcript();
            self.active_capture = Some(field);
            dictation.start_capture(true);
        }
    }

    /// Stream the live transcript into the captured field (called each tick
    /// while the editor is open)
    pub fn apply_transcript(&mut self, dictation: &dyn Dictation) {
        let field = match self.active_capture {
            Some(field) if dictation.is_capturing() => field,
            _ => return,
        };
        let transcript = dictation.transcript().to_string();
        match field {
            CaptureField::Title => self.title = transcript,
            CaptureField::Description => self.description = transcript,
        }
    }

    /// Attach a local audio file as the task's notification sound
    pub fn attach_sound(&mut self, path: &Path) -> anyhow::Result<()> {
        self.sound_input = file_resource(path)?;
        Ok(())
    }

    /// Validate and convert the draft into an explicit save operation. On
    /// failure the editor stays open with `error` set.
    pub fn submit(&mut self) -> Result<SaveOp, SubmitError> {
        let result = self.build_save_op();
        if let Err(e) = &result {
            self.error = Some(e.clone());
        }
        result
    }

    fn build_save_op(&self) -> Result<SaveOp, SubmitError> {
        if self.title.trim().is_empty() {
            return Err(SubmitError::EmptyTitle);
        }

        let time = parse_time(&self.time_input).ok_or(SubmitError::BadTime)?;
        let date = NaiveDate::parse_from_str(self.date_input.trim(), "%Y-%m-%d")
            .map_err(|_| SubmitError::BadDate)?;
        let reminder_time = match self.reminder_input.trim() {
            "" => None,
            raw => Some(parse_reminder(raw).ok_or(SubmitError::BadReminder)?),
        };

        let fields = TaskFields {
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            time,
            date,
            tag: self.tag,
            reminder_time,
            repeat_type: self.repeat_type,
            repeat_days: self.repeat_days.clone(),
            sound_url: match self.sound_input.trim() {
                "" => None,
                sound => Some(sound.to_string()),
            },
        };

        Ok(match self.editing_id {
            Some(id) => SaveOp::Replace(id, fields),
            None => SaveOp::New(fields),
        })
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

fn parse_reminder(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}
