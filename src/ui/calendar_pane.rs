use crate::app::AppState;
use crate::domain::{local_today, month_days, tasks_on};
use crate::ui::styles::{border_style, default_style, hint_style, selected_style, title_style, today_style};
use chrono::Datelike;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const DAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Render the month calendar: a 7-column grid of day cells with task titles
pub fn render_calendar_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let today = local_today();
    let days = month_days(app.cursor_date);
    let tasks = app.repository.tasks();

    let header = format!(
        " {} {} ",
        month_name(app.cursor_date.month()),
        app.cursor_date.year()
    );

    let mut lines = Vec::new();
    lines.push(Line::from(
        DAY_HEADERS
            .iter()
            .map(|d| Span::styled(format!("{:^9}", d), hint_style()))
            .collect::<Vec<_>>(),
    ));

    // Pad the first week so weekday columns line up (Sunday first)
    let first_offset = first_week_offset(days[0]);
    let mut week: Vec<Span> = vec![Span::raw(" ".repeat(9 * first_offset))];

    for day in &days {
        let count = tasks_on(tasks, *day).len();
        let cell = if count > 0 {
            format!("{:>3} ({:>2}) ", day.day(), count)
        } else {
            format!("{:>3}      ", day.day())
        };

        let style = if *day == app.cursor_date {
            selected_style()
        } else if *day == today {
            today_style()
        } else {
            default_style()
        };
        week.push(Span::styled(cell, style));

        if day.weekday().num_days_from_sunday() == 6 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }

    // Tasks on the selected day
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!("Tasks on {}:", app.cursor_date.format("%Y-%m-%d")),
        title_style(),
    )));
    let on_day = tasks_on(tasks, app.cursor_date);
    if on_day.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (none — press Enter to add)",
            hint_style(),
        )));
    }
    for task in on_day {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", task.time.format("%H:%M")), hint_style()),
            Span::styled(task.title.clone(), default_style()),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(header, title_style())),
    );

    f.render_widget(paragraph, area);
}

fn first_week_offset(first: chrono::NaiveDate) -> usize {
    first.weekday().num_days_from_sunday() as usize
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
