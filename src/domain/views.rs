use super::enums::Tag;
use super::task::Task;
use chrono::{Datelike, Months, NaiveDate};

/// Case-insensitive substring match against title OR description.
/// An empty search term matches everything.
pub fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task.description.to_lowercase().contains(&needle)
}

/// Exact tag match; no filter matches everything
pub fn matches_tag(task: &Task, filter: Option<Tag>) -> bool {
    match filter {
        Some(tag) => task.tag == tag,
        None => true,
    }
}

/// The visible subset for the today view.
///
/// With neither a search term nor a tag filter active, shows exactly the
/// tasks dated `today`. As soon as either filter is active the date
/// restriction is dropped entirely: filtering is global, the "today"
/// restriction is the default-state convenience only.
pub fn visible_tasks<'a>(
    tasks: &'a [Task],
    search: &str,
    tag_filter: Option<Tag>,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let restrict_to_today = search.is_empty() && tag_filter.is_none();

    tasks
        .iter()
        .filter(|task| matches_search(task, search))
        .filter(|task| matches_tag(task, tag_filter))
        .filter(|task| !restrict_to_today || task.date == today)
        .collect()
}

/// Every calendar day of the month containing `cursor`, first to last
pub fn month_days(cursor: NaiveDate) -> Vec<NaiveDate> {
    let first = cursor.with_day(1).expect("day 1 exists in every month");
    let next_month = first + Months::new(1);
    let days_in_month = next_month.signed_duration_since(first).num_days();

    (0..days_in_month)
        .map(|offset| first + chrono::Duration::days(offset))
        .collect()
}

/// Tasks whose date equals `day`. Recomputed from the full collection on
/// every render, not incrementally maintained.
pub fn tasks_on<'a>(tasks: &'a [Task], day: NaiveDate) -> Vec<&'a Task> {
    tasks.iter().filter(|task| task.date == day).collect()
}

/// Step the calendar cursor by whole months, preserving the day-of-month
/// where possible. Day-of-month overflow (e.g. Jan 31 -> February) is clamped
/// by chrono's month arithmetic.
pub fn step_month(cursor: NaiveDate, offset: i32) -> NaiveDate {
    if offset >= 0 {
        cursor + Months::new(offset as u32)
    } else {
        cursor - Months::new(offset.unsigned_abs())
    }
}
