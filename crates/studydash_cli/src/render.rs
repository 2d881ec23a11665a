//! Plain-text views printed by the CLI.

use studydash_core::{Countdown, Task, WeeklySchedule, WEEKDAY_LABELS};

pub fn task_lines(title: &str, tasks: &[Task]) -> String {
    let mut out = format!("{title}\n");
    if tasks.is_empty() {
        out.push_str("  (none)\n");
    }
    for (index, task) in tasks.iter().enumerate() {
        let mark = if task.done { 'x' } else { ' ' };
        out.push_str(&format!("  {:>2}. [{mark}] {}\n", index + 1, task.text));
    }
    out
}

pub fn week_lines(schedule: &WeeklySchedule) -> String {
    let mut out = String::from("Weekly schedule\n");
    for (weekday, label) in (0u8..).zip(WEEKDAY_LABELS) {
        let blocks = schedule.blocks(weekday).unwrap_or_default();
        let joined = blocks
            .iter()
            .enumerate()
            .map(|(index, block)| format!("{}. {}", index + 1, block.text))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(format!("  {label}  {joined}").trim_end());
        out.push('\n');
    }
    out
}

pub fn pomodoro_line(countdown: &Countdown) -> String {
    format!(
        "Pomodoro {} / {}",
        countdown.display(),
        studydash_core::format_time(countdown.duration_secs())
    )
}

#[cfg(test)]
mod tests {
    use super::{task_lines, week_lines};
    use studydash_core::{Task, WeeklySchedule};

    #[test]
    fn task_lines_number_from_one_and_mark_done() {
        let mut done = Task::new("essay", 0);
        done.done = true;
        let text = task_lines("Tasks", &[done, Task::new("quiz", 0)]);
        assert!(text.contains(" 1. [x] essay"));
        assert!(text.contains(" 2. [ ] quiz"));
    }

    #[test]
    fn week_lines_list_every_weekday() {
        let mut schedule = WeeklySchedule::new();
        schedule.add(6, "Review").unwrap();
        let text = week_lines(&schedule);
        assert_eq!(text.lines().count(), 8);
        assert!(text.contains("Sun  1. Review"));
    }
}
