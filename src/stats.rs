use chrono::{Datelike, Duration, NaiveDate};

use crate::models::Task;

/// Completion statistics derived from a task snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Completed tasks due or finished today.
    pub daily_completed: u32,
    /// All tasks due or finished today.
    pub daily_total: u32,
    /// Completed tasks falling in the current week.
    pub weekly_completed: u32,
    /// All tasks falling in the current week.
    pub weekly_total: u32,
    /// Consecutive-day completion streak, counted backward from the
    /// reference date.
    pub streak: u32,
}

/// Returns the Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Computes daily/weekly buckets and the completion streak as of `as_of`.
///
/// A task belongs to the daily bucket when its due date or completion date
/// equals `as_of`. For the weekly bucket the due date is used when present,
/// otherwise the completion date; tasks with neither are excluded.
///
/// The streak walks completed tasks from the most recent completion
/// backward, adding one per task as long as each completion is at most one
/// day before the previous one. Several completions on the same day each
/// count individually.
pub fn compute_stats(tasks: &[Task], as_of: NaiveDate) -> Stats {
    let today = as_of;
    let week_start = week_start(today);

    let daily: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.due_date == Some(today) || t.completed_at == Some(today))
        .collect();
    let daily_completed = daily.iter().filter(|t| t.completed).count() as u32;
    let daily_total = daily.len() as u32;

    let weekly: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.due_date.or(t.completed_at).is_some_and(|d| d >= week_start))
        .collect();
    let weekly_completed = weekly.iter().filter(|t| t.completed).count() as u32;
    let weekly_total = weekly.len() as u32;

    let mut completions: Vec<NaiveDate> = tasks
        .iter()
        .filter(|t| t.completed)
        .filter_map(|t| t.completed_at)
        .collect();
    completions.sort_by(|a, b| b.cmp(a));

    let mut streak = 0u32;
    let mut cursor = as_of;
    for completed_at in completions {
        let gap_days = (cursor - completed_at).num_days();
        if gap_days == 0 || gap_days == 1 {
            streak += 1;
            cursor = completed_at;
        } else {
            break;
        }
    }

    Stats {
        daily_completed,
        daily_total,
        weekly_completed,
        weekly_total,
        streak,
    }
}
