use std::collections::HashMap;
use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use log::warn;

use crate::listing::{filter_and_sort, ListFilter};
use crate::models::{Category, Priority, Task};
use crate::stats::compute_stats;
use crate::storage::{CategoryStore, JsonStore, TaskStore};

fn parse_due(due: &str, silent: bool) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(due, "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(e) => {
            if !silent { eprintln!("Invalid due date '{}': {}. Use YYYY-MM-DD.", due, e); }
            None
        }
    }
}

fn parse_priority(p: &str, silent: bool) -> Option<Priority> {
    match Priority::parse(p) {
        Some(p) => Some(p),
        None => {
            if !silent { eprintln!("Invalid priority '{}'. Use low, medium, high or urgent.", p); }
            None
        }
    }
}

/// Adjusts a category's cached task count, clamping at zero.
fn adjust_task_count(store: &impl CategoryStore, category_id: u64, delta: i64, silent: bool) {
    let category = match store.fetch_category(category_id) {
        Ok(Some(c)) => c,
        Ok(None) => {
            warn!("category {} not found while adjusting task count", category_id);
            return;
        }
        Err(e) => {
            if !silent { eprintln!("Failed to load category {}: {}", category_id, e); }
            return;
        }
    };
    let new_count = (i64::from(category.task_count) + delta).max(0) as u32;
    let updated = Category { task_count: new_count, ..category };
    if let Err(e) = store.save_category(&updated) {
        if !silent { eprintln!("Failed to update category {}: {}", category_id, e); }
    }
}

/// Adds a new task.
///
/// The task starts incomplete, created today, ordered after every existing
/// task. When a category is given, its cached task count is bumped.
pub fn cmd_add(
    store: &(impl TaskStore + CategoryStore),
    title: String,
    description: Option<String>,
    category: Option<u64>,
    priority: Option<String>,
    due: Option<String>,
    silent: bool,
) {
    let due_date = match due {
        Some(d) => match parse_due(&d, silent) {
            Some(d) => Some(d),
            None => return,
        },
        None => None,
    };
    let priority = match priority {
        Some(p) => match parse_priority(&p, silent) {
            Some(p) => Some(p),
            None => return,
        },
        None => None,
    };

    let tasks = match store.fetch_all() {
        Ok(t) => t,
        Err(e) => {
            if !silent { eprintln!("Failed to load tasks: {}", e); }
            return;
        }
    };
    let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let t = Task {
        id: next_id,
        title,
        description: description.unwrap_or_default(),
        category_id: category,
        priority,
        due_date,
        completed: false,
        completed_at: None,
        created_at: Local::now().date_naive(),
        order: Local::now().timestamp_millis(),
    };
    if let Err(e) = store.save(&t) {
        if !silent { eprintln!("Failed to save task: {}", e); }
        return;
    }
    if let Some(category_id) = category {
        adjust_task_count(store, category_id, 1, silent);
    }
    if !silent { println!("Task added (id = {})", next_id); }
}

/// Marks a task as complete, stamping today as the completion date.
pub fn cmd_complete(store: &impl TaskStore, id: u64, silent: bool) {
    let mut task = match store.fetch(id) {
        Ok(Some(t)) => t,
        Ok(None) => {
            if !silent { eprintln!("Task {} not found.", id); }
            return;
        }
        Err(e) => {
            if !silent { eprintln!("Failed to load task {}: {}", id, e); }
            return;
        }
    };
    task.completed = true;
    task.completed_at = Some(Local::now().date_naive());
    if let Err(e) = store.save(&task) {
        if !silent { eprintln!("Failed to save task: {}", e); }
    } else if !silent {
        println!("Task {} marked as complete.", id);
    }
}

/// Reopens a completed task, clearing its completion date.
pub fn cmd_reopen(store: &impl TaskStore, id: u64, silent: bool) {
    let mut task = match store.fetch(id) {
        Ok(Some(t)) => t,
        Ok(None) => {
            if !silent { eprintln!("Task {} not found.", id); }
            return;
        }
        Err(e) => {
            if !silent { eprintln!("Failed to load task {}: {}", id, e); }
            return;
        }
    };
    task.completed = false;
    task.completed_at = None;
    if let Err(e) = store.save(&task) {
        if !silent { eprintln!("Failed to save task: {}", e); }
    } else if !silent {
        println!("Task {} reopened.", id);
    }
}

/// Removes a task, keeping its category's cached count in step.
pub fn cmd_remove(store: &(impl TaskStore + CategoryStore), id: u64, silent: bool) {
    let task = match store.fetch(id) {
        Ok(Some(t)) => t,
        Ok(None) => {
            if !silent { eprintln!("Task {} not found.", id); }
            return;
        }
        Err(e) => {
            if !silent { eprintln!("Failed to load task {}: {}", id, e); }
            return;
        }
    };
    if let Err(e) = store.delete(id) {
        if !silent { eprintln!("Failed to remove task: {}", e); }
        return;
    }
    if let Some(category_id) = task.category_id {
        adjust_task_count(store, category_id, -1, silent);
    }
    if !silent { println!("Task {} removed.", id); }
}

/// Edits an existing task's details.
///
/// Only the provided fields change. Moving a task between categories adjusts
/// both cached counts.
pub fn cmd_edit(
    store: &(impl TaskStore + CategoryStore),
    id: u64,
    title: Option<String>,
    description: Option<String>,
    category: Option<u64>,
    priority: Option<String>,
    due: Option<String>,
    silent: bool,
) {
    let mut task = match store.fetch(id) {
        Ok(Some(t)) => t,
        Ok(None) => {
            if !silent { eprintln!("Task {} not found.", id); }
            return;
        }
        Err(e) => {
            if !silent { eprintln!("Failed to load task {}: {}", id, e); }
            return;
        }
    };
    let previous_category = task.category_id;
    if let Some(t) = title { task.title = t; }
    if let Some(d) = description { task.description = d; }
    if let Some(c) = category { task.category_id = Some(c); }
    if let Some(p) = priority {
        match parse_priority(&p, silent) {
            Some(p) => task.priority = Some(p),
            None => return,
        }
    }
    if let Some(d) = due {
        match parse_due(&d, silent) {
            Some(d) => task.due_date = Some(d),
            None => return,
        }
    }
    if let Err(e) = store.save(&task) {
        if !silent { eprintln!("Failed to save task: {}", e); }
        return;
    }
    if task.category_id != previous_category {
        if let Some(old) = previous_category {
            adjust_task_count(store, old, -1, silent);
        }
        if let Some(new) = task.category_id {
            adjust_task_count(store, new, 1, silent);
        }
    }
    if !silent { println!("Task {} updated.", id); }
}

/// Rewrites the manual order keys to match the given ID sequence.
pub fn cmd_reorder(store: &impl TaskStore, ids: Vec<u64>, silent: bool) {
    let mut tasks = match store.fetch_all() {
        Ok(t) => t,
        Err(e) => {
            if !silent { eprintln!("Failed to load tasks: {}", e); }
            return;
        }
    };
    for (index, id) in ids.iter().enumerate() {
        match tasks.iter_mut().find(|t| t.id == *id) {
            Some(t) => t.order = index as i64 + 1,
            None => warn!("reorder skipped unknown task id {}", id),
        }
    }
    if let Err(e) = store.save_all(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
    } else if !silent {
        println!("Reordered {} tasks.", ids.len());
    }
}

/// Lists tasks in a formatted table.
///
/// Tasks come from one category or the whole store, then go through the
/// filter/sort pipeline. Completed tasks are hidden unless `all` is set.
pub fn cmd_list(
    store: &(impl TaskStore + CategoryStore),
    category: Option<u64>,
    search: Option<String>,
    priority: Option<String>,
    all: bool,
) {
    let priority = match priority {
        Some(p) => match parse_priority(&p, false) {
            Some(p) => Some(p),
            None => return,
        },
        None => None,
    };
    let tasks = match category {
        Some(id) => store.fetch_by_category(id),
        None => store.fetch_all(),
    };
    let tasks = match tasks {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to load tasks: {}", e);
            return;
        }
    };
    let filter = ListFilter {
        search: search.unwrap_or_default(),
        priority,
        show_completed: all,
    };
    let tasks = filter_and_sort(&tasks, &filter);
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let category_names: HashMap<u64, String> = match store.fetch_categories() {
        Ok(categories) => categories.into_iter().map(|c| (c.id, c.name)).collect(),
        Err(e) => {
            warn!("failed to load categories for display: {}", e);
            HashMap::new()
        }
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Created").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    let today = Local::now().date_naive();

    for t in tasks {
        let priority_cell = match t.priority {
            Some(p) => Cell::new(p.name()).fg(match p {
                Priority::Urgent => Color::Red,
                Priority::High => Color::Yellow,
                Priority::Medium => Color::Green,
                Priority::Low => Color::Grey,
            }),
            None => Cell::new("-"),
        };
        let due_cell = match t.due_date {
            Some(d) if d < today && !t.completed => Cell::new(d).fg(Color::Red),
            Some(d) => Cell::new(d),
            None => Cell::new("-"),
        };
        let status = if t.completed { "Done" } else { "Pending" };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };
        let category_name = t
            .category_id
            .and_then(|id| category_names.get(&id).cloned())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.title),
            Cell::new(category_name),
            priority_cell,
            due_cell,
            Cell::new(t.created_at),
            Cell::new(status).fg(status_color),
        ]);
    }

    println!("{table}");
}

/// Prints completion statistics for today, this week and the streak.
pub fn cmd_stats(store: &impl TaskStore) {
    let tasks = match store.fetch_all() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to load tasks: {}", e);
            return;
        }
    };
    let stats = compute_stats(&tasks, Local::now().date_naive());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec![
            Cell::new("Window").add_attribute(Attribute::Bold),
            Cell::new("Completed").add_attribute(Attribute::Bold),
            Cell::new("Total").add_attribute(Attribute::Bold),
        ]);
    table.add_row(vec![
        Cell::new("Today"),
        Cell::new(stats.daily_completed),
        Cell::new(stats.daily_total),
    ]);
    table.add_row(vec![
        Cell::new("This week"),
        Cell::new(stats.weekly_completed),
        Cell::new(stats.weekly_total),
    ]);
    println!("{table}");
    println!("Streak: {} day(s)", stats.streak);
}

/// Adds a new category with an empty cached task count.
pub fn cmd_category_add(
    store: &impl CategoryStore,
    name: String,
    color: Option<String>,
    icon: Option<String>,
    silent: bool,
) {
    let categories = match store.fetch_categories() {
        Ok(c) => c,
        Err(e) => {
            if !silent { eprintln!("Failed to load categories: {}", e); }
            return;
        }
    };
    if categories.iter().any(|c| c.name == name) {
        if !silent { eprintln!("Category '{}' already exists.", name); }
        return;
    }
    let next_id = categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
    let category = Category {
        id: next_id,
        name: name.clone(),
        color: color.unwrap_or_default(),
        icon: icon.unwrap_or_default(),
        task_count: 0,
        order: Local::now().timestamp_millis(),
    };
    if let Err(e) = store.save_category(&category) {
        if !silent { eprintln!("Failed to save category: {}", e); }
    } else if !silent {
        println!("Category '{}' added (id = {})", name, next_id);
    }
}

/// Lists all categories in display order.
pub fn cmd_category_list(store: &impl CategoryStore) {
    let categories = match store.fetch_categories() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load categories: {}", e);
            return;
        }
    };
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["ID", "Name", "Color", "Icon", "Tasks"]);
    for c in categories {
        table.add_row(vec![
            c.id.to_string(),
            c.name,
            c.color,
            c.icon,
            c.task_count.to_string(),
        ]);
    }
    println!("{table}");
}

/// Edits a category's display fields.
pub fn cmd_category_edit(
    store: &impl CategoryStore,
    id: u64,
    name: Option<String>,
    color: Option<String>,
    icon: Option<String>,
    silent: bool,
) {
    let mut category = match store.fetch_category(id) {
        Ok(Some(c)) => c,
        Ok(None) => {
            if !silent { eprintln!("Category {} not found.", id); }
            return;
        }
        Err(e) => {
            if !silent { eprintln!("Failed to load category {}: {}", id, e); }
            return;
        }
    };
    if let Some(n) = name { category.name = n; }
    if let Some(c) = color { category.color = c; }
    if let Some(i) = icon { category.icon = i; }
    if let Err(e) = store.save_category(&category) {
        if !silent { eprintln!("Failed to save category: {}", e); }
    } else if !silent {
        println!("Category {} updated.", id);
    }
}

/// Removes a category and detaches its tasks.
pub fn cmd_category_remove(store: &(impl TaskStore + CategoryStore), id: u64, silent: bool) {
    match store.fetch_category(id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            if !silent { eprintln!("Category {} not found.", id); }
            return;
        }
        Err(e) => {
            if !silent { eprintln!("Failed to load category {}: {}", id, e); }
            return;
        }
    }
    if let Err(e) = store.delete_category(id) {
        if !silent { eprintln!("Failed to remove category: {}", e); }
        return;
    }

    // Detach tasks that pointed at the removed category.
    let mut tasks = match store.fetch_all() {
        Ok(t) => t,
        Err(e) => {
            if !silent { eprintln!("Failed to load tasks: {}", e); }
            return;
        }
    };
    let mut updated = false;
    for t in tasks.iter_mut() {
        if t.category_id == Some(id) {
            t.category_id = None;
            updated = true;
        }
    }
    if updated {
        if let Err(e) = store.save_all(&tasks) {
            if !silent { eprintln!("Failed to update tasks: {}", e); }
            return;
        }
    }
    if !silent { println!("Category {} removed.", id); }
}

/// Resets the database by deleting all tasks and categories.
pub fn cmd_reset(store: &JsonStore, force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks and categories? This cannot be undone. [y/N] ");
        io::stdout().flush().unwrap();
        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = store.reset() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
