use chrono::NaiveDate;
use taskflow::listing::{filter_and_sort, ListFilter};
use taskflow::models::{Priority, Task};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(id: u64, title: &str) -> Task {
    Task {
        id,
        title: title.into(),
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

#[test]
fn test_default_filter_returns_permutation() {
    let tasks = vec![
        Task { priority: Some(Priority::High), ..task(1, "One") },
        Task { completed: true, completed_at: Some(date(2024, 3, 2)), ..task(2, "Two") },
        Task { due_date: Some(date(2024, 3, 5)), ..task(3, "Three") },
    ];

    let result = filter_and_sort(&tasks, &ListFilter::default());

    assert_eq!(result.len(), tasks.len());
    let mut ids: Vec<u64> = result.iter().map(|t| t.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_sort_is_idempotent() {
    let tasks = vec![
        Task { completed: true, ..task(1, "Done") },
        Task { priority: Some(Priority::Urgent), ..task(2, "Urgent") },
        Task { due_date: Some(date(2024, 3, 9)), ..task(3, "Dated") },
        task(4, "Plain"),
    ];
    let filter = ListFilter::default();

    let once = filter_and_sort(&tasks, &filter);
    let twice = filter_and_sort(&once, &filter);

    let once_ids: Vec<u64> = once.iter().map(|t| t.id).collect();
    let twice_ids: Vec<u64> = twice.iter().map(|t| t.id).collect();
    assert_eq!(once_ids, twice_ids);
}

#[test]
fn test_incomplete_before_completed() {
    let tasks = vec![
        Task { completed: true, priority: Some(Priority::Urgent), ..task(1, "Done") },
        Task { priority: Some(Priority::Low), ..task(2, "Open") },
    ];

    let result = filter_and_sort(&tasks, &ListFilter::default());

    assert_eq!(result[0].id, 2);
    assert_eq!(result[1].id, 1);
}

#[test]
fn test_priority_ordering() {
    let tasks = vec![
        Task { priority: Some(Priority::Medium), ..task(1, "M") },
        Task { priority: Some(Priority::Urgent), ..task(2, "U") },
        Task { priority: Some(Priority::Low), ..task(3, "L") },
        Task { priority: Some(Priority::High), ..task(4, "H") },
    ];

    let result = filter_and_sort(&tasks, &ListFilter::default());

    let ids: Vec<u64> = result.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 4, 1, 3]);
}

#[test]
fn test_missing_priority_sorts_last() {
    let tasks = vec![
        task(1, "No priority"),
        Task { priority: Some(Priority::Low), ..task(2, "Low") },
    ];

    let result = filter_and_sort(&tasks, &ListFilter::default());

    assert_eq!(result[0].id, 2);
    assert_eq!(result[1].id, 1);
}

#[test]
fn test_due_date_tiebreak() {
    let tasks = vec![
        task(1, "Undated"),
        Task { due_date: Some(date(2024, 3, 20)), ..task(2, "Later") },
        Task { due_date: Some(date(2024, 3, 5)), ..task(3, "Sooner") },
    ];

    let result = filter_and_sort(&tasks, &ListFilter::default());

    let ids: Vec<u64> = result.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn test_equal_due_dates_keep_input_order() {
    // Both dated and equal: creation date is not consulted, the stable sort
    // keeps the input order.
    let tasks = vec![
        Task { due_date: Some(date(2024, 3, 5)), created_at: date(2024, 2, 1), ..task(1, "First") },
        Task { due_date: Some(date(2024, 3, 5)), created_at: date(2024, 2, 20), ..task(2, "Second") },
    ];

    let result = filter_and_sort(&tasks, &ListFilter::default());

    let ids: Vec<u64> = result.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_created_at_tiebreak_for_undated_tasks() {
    let tasks = vec![
        Task { created_at: date(2024, 2, 1), ..task(1, "Old") },
        Task { created_at: date(2024, 2, 20), ..task(2, "New") },
    ];

    let result = filter_and_sort(&tasks, &ListFilter::default());

    assert_eq!(result[0].id, 2);
    assert_eq!(result[1].id, 1);
}

#[test]
fn test_search_matches_title_and_description() {
    let tasks = vec![
        Task { description: "water the plants".into(), ..task(1, "Garden") },
        task(2, "Buy PLANTS"),
        task(3, "Laundry"),
    ];
    let filter = ListFilter { search: "plants".into(), ..ListFilter::default() };

    let result = filter_and_sort(&tasks, &filter);

    let mut ids: Vec<u64> = result.iter().map(|t| t.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_priority_filter_keeps_exact_matches() {
    let tasks = vec![
        Task { priority: Some(Priority::High), ..task(1, "H") },
        Task { priority: Some(Priority::Urgent), ..task(2, "U") },
        task(3, "None"),
    ];
    let filter = ListFilter { priority: Some(Priority::High), ..ListFilter::default() };

    let result = filter_and_sort(&tasks, &filter);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
}

#[test]
fn test_hide_completed() {
    let tasks = vec![
        Task { priority: Some(Priority::High), ..task(1, "Buy milk") },
        Task {
            priority: Some(Priority::Urgent),
            completed: true,
            completed_at: Some(date(2024, 3, 2)),
            ..task(2, "Pay rent")
        },
    ];
    let filter = ListFilter { show_completed: false, ..ListFilter::default() };

    let result = filter_and_sort(&tasks, &filter);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].title, "Buy milk");
}

#[test]
fn test_filters_are_conjunctive() {
    let tasks = vec![
        Task { priority: Some(Priority::High), ..task(1, "Buy milk") },
        Task { priority: Some(Priority::Low), ..task(2, "Buy bread") },
        Task {
            priority: Some(Priority::High),
            completed: true,
            completed_at: Some(date(2024, 3, 2)),
            ..task(3, "Buy eggs")
        },
    ];
    let filter = ListFilter {
        search: "buy".into(),
        priority: Some(Priority::High),
        show_completed: false,
    };

    let result = filter_and_sort(&tasks, &filter);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 1);
}
