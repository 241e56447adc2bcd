pub mod enums;
pub mod task;
pub mod views;

pub use enums::{RepeatType, Tag, UiMode, ViewMode, WEEK_DAYS};
pub use task::{default_time, local_today, Task, TaskFields};
pub use views::{matches_search, matches_tag, month_days, step_month, tasks_on, visible_tasks};
