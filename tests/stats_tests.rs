use chrono::NaiveDate;
use taskflow::models::Task;
use taskflow::stats::{compute_stats, week_start, Stats};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(id: u64) -> Task {
    Task {
        id,
        title: format!("Task {}", id),
        description: String::new(),
        category_id: None,
        priority: None,
        due_date: None,
        completed: false,
        completed_at: None,
        created_at: date(2024, 3, 1),
        order: id as i64,
    }
}

fn done(id: u64, completed_at: NaiveDate) -> Task {
    Task {
        completed: true,
        completed_at: Some(completed_at),
        ..task(id)
    }
}

#[test]
fn test_empty_input_gives_all_zeros() {
    let stats = compute_stats(&[], date(2024, 3, 10));
    assert_eq!(stats, Stats::default());
}

#[test]
fn test_week_start_is_monday_on_or_before() {
    // 2024-03-11 was a Monday.
    assert_eq!(week_start(date(2024, 3, 11)), date(2024, 3, 11));
    assert_eq!(week_start(date(2024, 3, 13)), date(2024, 3, 11));
    // Sunday maps to the Monday six days earlier.
    assert_eq!(week_start(date(2024, 3, 10)), date(2024, 3, 4));
}

#[test]
fn test_daily_bucket_counts_due_and_completed() {
    let as_of = date(2024, 3, 10);
    let tasks = vec![
        // Due today, still open: in the bucket but not completed.
        Task { due_date: Some(as_of), ..task(1) },
        // Finished today.
        done(2, as_of),
        // Due another day.
        Task { due_date: Some(date(2024, 3, 12)), ..task(3) },
    ];

    let stats = compute_stats(&tasks, as_of);

    assert_eq!(stats.daily_total, 2);
    assert_eq!(stats.daily_completed, 1);
}

#[test]
fn test_weekly_bucket_prefers_due_date() {
    // Wednesday; the week runs from Monday 2024-03-11.
    let as_of = date(2024, 3, 13);
    let tasks = vec![
        // Due on the Monday boundary: included.
        Task { due_date: Some(date(2024, 3, 11)), ..task(1) },
        // Due before the week started: excluded.
        Task { due_date: Some(date(2024, 3, 10)), ..task(2) },
        // No due date, completed inside the week: included.
        done(3, date(2024, 3, 12)),
        // Due date wins over the completion date, so this is excluded even
        // though it was completed inside the week.
        Task { due_date: Some(date(2024, 3, 8)), ..done(4, date(2024, 3, 12)) },
        // Neither date: excluded.
        task(5),
    ];

    let stats = compute_stats(&tasks, as_of);

    assert_eq!(stats.weekly_total, 2);
    assert_eq!(stats.weekly_completed, 1);
}

#[test]
fn test_streak_stops_at_two_day_gap() {
    let as_of = date(2024, 3, 10);
    let tasks = vec![
        done(1, date(2024, 3, 10)),
        done(2, date(2024, 3, 9)),
        // Two days behind the previous completion: breaks the walk.
        done(3, date(2024, 3, 7)),
    ];

    let stats = compute_stats(&tasks, as_of);

    assert_eq!(stats.streak, 2);
}

#[test]
fn test_streak_counts_each_task_on_the_same_day() {
    let as_of = date(2024, 3, 10);
    let tasks = vec![
        done(1, date(2024, 3, 10)),
        done(2, date(2024, 3, 10)),
        done(3, date(2024, 3, 9)),
    ];

    let stats = compute_stats(&tasks, as_of);

    assert_eq!(stats.streak, 3);
}

#[test]
fn test_streak_zero_when_latest_completion_is_stale() {
    let as_of = date(2024, 3, 10);
    let tasks = vec![done(1, date(2024, 3, 8)), done(2, date(2024, 3, 7))];

    let stats = compute_stats(&tasks, as_of);

    assert_eq!(stats.streak, 0);
}

#[test]
fn test_streak_ignores_tasks_without_completion_date() {
    let as_of = date(2024, 3, 10);
    let tasks = vec![
        // Completed flag without a date: no date information, skipped.
        Task { completed: true, ..task(1) },
        done(2, date(2024, 3, 10)),
        // Open task with a stray completion date: not a completion.
        Task { completed_at: Some(date(2024, 3, 9)), ..task(3) },
    ];

    let stats = compute_stats(&tasks, as_of);

    assert_eq!(stats.streak, 1);
}
