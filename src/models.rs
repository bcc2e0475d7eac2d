use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Priority level of a task, from least to most pressing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Numeric rank used for sorting: `urgent=4 > high=3 > medium=2 > low=1`.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }

    /// Parses a priority name (`low`, `medium`, `high`, `urgent`).
    pub fn parse(s: &str) -> Option<Priority> {
        match s.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "urgent" => Some(Priority::Urgent),
            _ => None,
        }
    }

    /// Display name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

/// Represents a single task in the task manager.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: u64,
    /// Short title of the task.
    pub title: String,
    /// Longer free-form description.
    #[serde(default)]
    pub description: String,
    /// Category the task belongs to, if any.
    #[serde(default)]
    pub category_id: Option<u64>,
    /// Priority level. Records without one sort below `low`.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Optional due date (date only, no time component).
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Date the task was completed. Expected to be set when `completed` is
    /// true, but consumers must not rely on that for malformed records.
    #[serde(default)]
    pub completed_at: Option<NaiveDate>,
    /// Date the task was created. Immutable after creation.
    pub created_at: NaiveDate,
    /// Manual sort key. Values are not required to be unique or contiguous.
    #[serde(default)]
    pub order: i64,
}

impl Task {
    /// Rank used by the sort pipeline; a missing priority ranks 0 (lowest).
    pub fn priority_rank(&self) -> u8 {
        self.priority.map_or(0, Priority::rank)
    }
}

/// Represents a named grouping of tasks.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Category {
    /// Unique identifier for the category.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Display color (hex string or palette name, opaque to this crate).
    #[serde(default)]
    pub color: String,
    /// Display icon name, opaque to this crate.
    #[serde(default)]
    pub icon: String,
    /// Cached number of tasks in this category. Maintained by the mutation
    /// commands, never recomputed from the task list.
    #[serde(default)]
    pub task_count: u32,
    /// Display ordering among categories.
    #[serde(default)]
    pub order: i64,
}
