//! # Taskflow
//!
//! A terminal task manager with categories, priorities and progress
//! statistics. Tasks are plain records; the list view and the stats view are
//! pure functions over a snapshot of those records, so the same logic serves
//! the CLI, tests and any embedding caller unchanged.
//!
//! ## Features
//!
//! *   **Smart Ordering**: Incomplete tasks first, then by priority
//!     (`urgent` > `high` > `medium` > `low`), then by due date, with stable
//!     handling of everything the rules leave untouched.
//! *   **Search & Filters**: Case-insensitive search over title and
//!     description, exact priority filtering, optional hiding of completed
//!     tasks.
//! *   **Progress Stats**: Daily and weekly completion counts plus a
//!     consecutive-day completion streak.
//! *   **Categories**: Named groups with display metadata and a cached task
//!     count kept in step by the mutation commands.
//! *   **Pluggable Storage**: Commands run against the [`storage::TaskStore`]
//!     and [`storage::CategoryStore`] traits; the default backend keeps JSON
//!     files in the XDG data directory, and an in-memory store backs tests.
//!
//! ## Data Storage
//!
//! Records are saved in your local data directory:
//! *   Linux: `~/.local/share/taskflow/`
//! *   macOS: `~/Library/Application Support/taskflow/`
//! *   Windows: `%APPDATA%\taskflow\`
//!
//! You can override this by setting the `TASKFLOW_DB` environment variable.

pub mod commands;
pub mod listing;
pub mod models;
pub mod stats;
pub mod storage;
