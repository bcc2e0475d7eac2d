use std::cmp::Ordering;

use crate::models::{Priority, Task};

/// Filter criteria for the task list view.
///
/// All filters are conjunctive: a task must pass every active filter to stay
/// in the result.
#[derive(Debug, Clone)]
pub struct ListFilter {
    /// Case-insensitive substring match against title or description.
    /// An empty query matches everything.
    pub search: String,
    /// Keep only tasks with exactly this priority. `None` keeps all.
    pub priority: Option<Priority>,
    /// When false, completed tasks are dropped.
    pub show_completed: bool,
}

impl Default for ListFilter {
    fn default() -> Self {
        ListFilter {
            search: String::new(),
            priority: None,
            show_completed: true,
        }
    }
}

impl ListFilter {
    fn matches(&self, task: &Task) -> bool {
        let matches_search = self.search.is_empty() || {
            let q = self.search.to_lowercase();
            task.title.to_lowercase().contains(&q)
                || task.description.to_lowercase().contains(&q)
        };
        let matches_priority = self.priority.map_or(true, |p| task.priority == Some(p));
        let matches_completed = self.show_completed || !task.completed;
        matches_search && matches_priority && matches_completed
    }
}

/// Filters and sorts a task snapshot for display.
///
/// The sort is a total order applied through sequential tie-breaks:
/// 1. Incomplete tasks before completed ones.
/// 2. Higher priority first (a task without a priority ranks below `low`).
/// 3. Earlier due date first; a dated task before an undated one.
/// 4. When neither task has a due date, more recently created first.
///
/// Any remaining ties keep their input relative order (the sort is stable).
/// The input is never mutated and malformed records never cause an error.
pub fn filter_and_sort(tasks: &[Task], filter: &ListFilter) -> Vec<Task> {
    let mut result: Vec<Task> = tasks
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    result.sort_by(compare_tasks);
    result
}

/// Comparison implementing the display order described on [`filter_and_sort`].
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    if a.completed != b.completed {
        // Completed tasks go to the bottom.
        return if a.completed {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    match b.priority_rank().cmp(&a.priority_rank()) {
        Ordering::Equal => {}
        ord => return ord,
    }

    match (a.due_date, b.due_date) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.created_at.cmp(&a.created_at),
    }
}
