use serde::{Deserialize, Serialize};

/// Weekday abbreviations used for daily-repeat selection, Monday first
pub const WEEK_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Category tag for tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    #[default]
    Work,
    Personal,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Work => "Work",
            Tag::Personal => "Personal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Work" => Some(Tag::Work),
            "Personal" => Some(Tag::Personal),
            _ => None,
        }
    }

    /// Get all tags as a list (for the filter cycle and the editor)
    pub fn all() -> &'static [Tag] {
        &[Tag::Work, Tag::Personal]
    }
}

/// Repeat rule for a task. Captured and stored but never expanded into
/// additional calendar occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatType {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl RepeatType {
    pub fn name(&self) -> &'static str {
        match self {
            RepeatType::None => "No Repeat",
            RepeatType::Daily => "Daily",
            RepeatType::Weekly => "Weekly",
            RepeatType::Monthly => "Monthly",
        }
    }

    /// Cycle to the next repeat type (editor field toggling)
    pub fn next(&self) -> Self {
        match self {
            RepeatType::None => RepeatType::Daily,
            RepeatType::Daily => RepeatType::Weekly,
            RepeatType::Weekly => RepeatType::Monthly,
            RepeatType::Monthly => RepeatType::None,
        }
    }
}

/// Top-level view switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Today,
    Calendar,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Searching,
    Editing,
}
