use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use log::debug;
use thiserror::Error;

use crate::models::{Category, Task};

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed store file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read/write access to task records.
///
/// Implementations own persistence; callers hand the returned snapshots to
/// the pure pipeline functions and never mutate them in place.
pub trait TaskStore {
    /// Returns all tasks, sorted by their manual `order` key ascending.
    fn fetch_all(&self) -> StoreResult<Vec<Task>>;
    /// Returns the tasks of one category, sorted by `order` ascending.
    fn fetch_by_category(&self, category_id: u64) -> StoreResult<Vec<Task>>;
    /// Returns a single task by ID, or `None` if it does not exist.
    fn fetch(&self, id: u64) -> StoreResult<Option<Task>>;
    /// Inserts the task, or replaces the stored task with the same ID.
    fn save(&self, task: &Task) -> StoreResult<()>;
    /// Replaces the entire task collection.
    fn save_all(&self, tasks: &[Task]) -> StoreResult<()>;
    /// Deletes a task by ID. Deleting an unknown ID is not an error.
    fn delete(&self, id: u64) -> StoreResult<()>;
}

/// Read/write access to category records.
pub trait CategoryStore {
    /// Returns all categories, sorted by their display `order` ascending.
    fn fetch_categories(&self) -> StoreResult<Vec<Category>>;
    /// Returns a single category by ID, or `None` if it does not exist.
    fn fetch_category(&self, id: u64) -> StoreResult<Option<Category>>;
    /// Inserts the category, or replaces the stored one with the same ID.
    fn save_category(&self, category: &Category) -> StoreResult<()>;
    /// Deletes a category by ID. Deleting an unknown ID is not an error.
    fn delete_category(&self, id: u64) -> StoreResult<()>;
}

/// JSON-file-backed store (`tasks.json` and `categories.json`).
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Opens a store rooted at the default data directory.
    ///
    /// The directory is determined in the following order:
    /// 1. `TASKFLOW_DB` environment variable.
    /// 2. `~/.local/share/taskflow` (on Linux).
    /// 3. The current directory (fallback).
    pub fn open_default() -> JsonStore {
        let dir = std::env::var("TASKFLOW_DB").map(PathBuf::from).unwrap_or_else(|_| {
            let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            p.push("taskflow");
            p
        });
        JsonStore::open(dir)
    }

    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: PathBuf) -> JsonStore {
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        JsonStore { dir }
    }

    fn tasks_path(&self) -> PathBuf {
        self.dir.join("tasks.json")
    }

    fn categories_path(&self) -> PathBuf {
        self.dir.join("categories.json")
    }

    fn read_file<T: serde::de::DeserializeOwned>(&self, path: &PathBuf) -> StoreResult<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut f = OpenOptions::new().read(true).open(path)?;
        let mut s = String::new();
        f.read_to_string(&mut s)?;
        Ok(serde_json::from_str(&s)?)
    }

    fn write_file<T: serde::Serialize>(&self, path: &PathBuf, records: &[T]) -> StoreResult<()> {
        let s = serde_json::to_string_pretty(records)?;
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        f.write_all(s.as_bytes())?;
        debug!("wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    /// Deletes the tasks and categories files.
    pub fn reset(&self) -> StoreResult<()> {
        for path in [self.tasks_path(), self.categories_path()] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

impl TaskStore for JsonStore {
    fn fetch_all(&self) -> StoreResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.read_file(&self.tasks_path())?;
        tasks.sort_by_key(|t| t.order);
        Ok(tasks)
    }

    fn fetch_by_category(&self, category_id: u64) -> StoreResult<Vec<Task>> {
        let mut tasks = self.fetch_all()?;
        tasks.retain(|t| t.category_id == Some(category_id));
        Ok(tasks)
    }

    fn fetch(&self, id: u64) -> StoreResult<Option<Task>> {
        let tasks: Vec<Task> = self.read_file(&self.tasks_path())?;
        Ok(tasks.into_iter().find(|t| t.id == id))
    }

    fn save(&self, task: &Task) -> StoreResult<()> {
        let mut tasks: Vec<Task> = self.read_file(&self.tasks_path())?;
        if let Some(t) = tasks.iter_mut().find(|t| t.id == task.id) {
            *t = task.clone();
        } else {
            tasks.push(task.clone());
        }
        self.write_file(&self.tasks_path(), &tasks)
    }

    fn save_all(&self, tasks: &[Task]) -> StoreResult<()> {
        self.write_file(&self.tasks_path(), tasks)
    }

    fn delete(&self, id: u64) -> StoreResult<()> {
        let mut tasks: Vec<Task> = self.read_file(&self.tasks_path())?;
        tasks.retain(|t| t.id != id);
        self.write_file(&self.tasks_path(), &tasks)
    }
}

impl CategoryStore for JsonStore {
    fn fetch_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories: Vec<Category> = self.read_file(&self.categories_path())?;
        categories.sort_by_key(|c| c.order);
        Ok(categories)
    }

    fn fetch_category(&self, id: u64) -> StoreResult<Option<Category>> {
        let categories: Vec<Category> = self.read_file(&self.categories_path())?;
        Ok(categories.into_iter().find(|c| c.id == id))
    }

    fn save_category(&self, category: &Category) -> StoreResult<()> {
        let mut categories: Vec<Category> = self.read_file(&self.categories_path())?;
        if let Some(c) = categories.iter_mut().find(|c| c.id == category.id) {
            *c = category.clone();
        } else {
            categories.push(category.clone());
        }
        self.write_file(&self.categories_path(), &categories)
    }

    fn delete_category(&self, id: u64) -> StoreResult<()> {
        let mut categories: Vec<Category> = self.read_file(&self.categories_path())?;
        categories.retain(|c| c.id != id);
        self.write_file(&self.categories_path(), &categories)
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
    categories: Mutex<Vec<Category>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl TaskStore for MemoryStore {
    fn fetch_all(&self) -> StoreResult<Vec<Task>> {
        let mut tasks = self.tasks.lock().unwrap().clone();
        tasks.sort_by_key(|t| t.order);
        Ok(tasks)
    }

    fn fetch_by_category(&self, category_id: u64) -> StoreResult<Vec<Task>> {
        let mut tasks = self.fetch_all()?;
        tasks.retain(|t| t.category_id == Some(category_id));
        Ok(tasks)
    }

    fn fetch(&self, id: u64) -> StoreResult<Option<Task>> {
        Ok(self.tasks.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    fn save(&self, task: &Task) -> StoreResult<()> {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(t) = tasks.iter_mut().find(|t| t.id == task.id) {
            *t = task.clone();
        } else {
            tasks.push(task.clone());
        }
        Ok(())
    }

    fn save_all(&self, tasks: &[Task]) -> StoreResult<()> {
        *self.tasks.lock().unwrap() = tasks.to_vec();
        Ok(())
    }

    fn delete(&self, id: u64) -> StoreResult<()> {
        self.tasks.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }
}

impl CategoryStore for MemoryStore {
    fn fetch_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories = self.categories.lock().unwrap().clone();
        categories.sort_by_key(|c| c.order);
        Ok(categories)
    }

    fn fetch_category(&self, id: u64) -> StoreResult<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    fn save_category(&self, category: &Category) -> StoreResult<()> {
        let mut categories = self.categories.lock().unwrap();
        if let Some(c) = categories.iter_mut().find(|c| c.id == category.id) {
            *c = category.clone();
        } else {
            categories.push(category.clone());
        }
        Ok(())
    }

    fn delete_category(&self, id: u64) -> StoreResult<()> {
        self.categories.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}
