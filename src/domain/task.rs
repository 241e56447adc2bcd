use super::enums::{RepeatType, Tag};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default time slot for a fresh task
pub fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(6, 0, 0).expect("06:00 is a valid time")
}

/// Everything on a task except its identity. The editor builds one of these;
/// the repository attaches (or preserves) the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub time: NaiveTime,
    pub date: NaiveDate,
    pub tag: Tag,
    pub reminder_time: Option<NaiveDateTime>,
    pub repeat_type: RepeatType,
    pub repeat_days: Vec<String>,
    pub sound_url: Option<String>,
}

impl TaskFields {
    /// Blank fields with the editor defaults (time 06:00, date = today, tag Work)
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            time: default_time(),
            date: today,
            tag: Tag::default(),
            reminder_time: None,
            repeat_type: RepeatType::default(),
            repeat_days: Vec::new(),
            sound_url: None,
        }
    }
}

/// The sole entity: a schedulable item with optional reminder/repeat/sound
/// metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique id, immutable once assigned
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Display/sort hint only, not enforced against the date
    pub time: NaiveTime,
    /// Determines calendar placement and "today" membership
    pub date: NaiveDate,
    pub tag: Tag,
    /// When present and in the future at save time, arms exactly one reminder
    pub reminder_time: Option<NaiveDateTime>,
    pub repeat_type: RepeatType,
    /// Weekday abbreviations, relevant only when `repeat_type` is Daily
    pub repeat_days: Vec<String>,
    /// Custom notification sound; the fixed default is used when absent
    pub sound_url: Option<String>,
}

impl Task {
    /// Create a task with a fresh id
    pub fn new(fields: TaskFields) -> Self {
        Self::with_id(Uuid::new_v4(), fields)
    }

    pub fn with_id(id: Uuid, fields: TaskFields) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            time: fields.time,
            date: fields.date,
            tag: fields.tag,
            reminder_time: fields.reminder_time,
            repeat_type: fields.repeat_type,
            repeat_days: fields.repeat_days,
            sound_url: fields.sound_url,
        }
    }

    /// The task's fields, without its identity (for pre-filling the editor)
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            time: self.time,
            date: self.date,
            tag: self.tag,
            reminder_time: self.reminder_time,
            repeat_type: self.repeat_type,
            repeat_days: self.repeat_days.clone(),
            sound_url: self.sound_url.clone(),
        }
    }

    /// Notification body: the description, or a generic placeholder when empty
    pub fn reminder_body(&self) -> String {
        if self.description.is_empty() {
            String::from("You have a reminder!")
        } else {
            self.description.clone()
        }
    }
}

/// Today's date on the local clock. Computed at the instant of evaluation,
/// never cached across renders.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
