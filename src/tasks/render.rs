use jiff::tz::TimeZone;

use super::Task;

/// `[x] #3 write report (H) - 2025-03-01 09:00`, deadline shown in `tz`.
pub fn render_line(task: &Task, tz: &TimeZone) -> String {
    let check = if task.completed { "x" } else { " " };
    let deadline = task
        .deadline
        .map(|ts| ts.to_zoned(tz.clone()).strftime("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    format!(
        "[{}] #{} {} ({}) - {}",
        check, task.id, task.title, task.priority, deadline
    )
    .trim_end()
    .to_string()
}

/// One line per task in the system time zone.
pub fn render(tasks: &[Task]) -> String {
    let tz = TimeZone::system();
    tasks
        .iter()
        .map(|t| render_line(t, &tz))
        .collect::<Vec<_>>()
        .join("\n")
}
