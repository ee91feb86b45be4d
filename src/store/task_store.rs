//! Task store - ordered task list with write-through persistence

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::error::{Result, StoreError};
use super::storage::Storage;
use crate::task::{Task, TaskId};

/// Owns every task of one profile.
///
/// Each mutation is written to disk before it returns. When that write
/// fails the in-memory change is undone, so the list never drifts from the
/// record without the caller being told.
pub struct TaskStore {
    storage: Storage,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Empty store; call [`TaskStore::load`] to read the record.
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            tasks: Vec::new(),
        }
    }

    /// Store populated from its record.
    pub fn open(storage: Storage) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Replace the in-memory list with the record on disk.
    ///
    /// A missing record means first run. An unreadable or corrupt one is
    /// logged and treated the same way. Whenever anything in the record has
    /// to be thrown away, the file is first copied aside with
    /// [`Storage::preserve_damaged`] so the next save cannot lose it.
    pub fn load(&mut self) {
        let (loaded, mut damaged) = match self.storage.load() {
            Ok(record) => (record.tasks, record.skipped > 0),
            Err(e @ StoreError::Corrupt { .. }) => {
                warn!("{}; starting with an empty task list", e);
                (Vec::new(), true)
            }
            Err(e) => {
                warn!("{}; starting with an empty task list", e);
                (Vec::new(), false)
            }
        };

        let mut seen = HashSet::new();
        self.tasks = loaded
            .into_iter()
            .filter_map(|mut task| {
                if let Err(e) = task.validate() {
                    warn!("Dropping task '{}' from record: {}", task.name(), e);
                    damaged = true;
                    return None;
                }
                if !seen.insert(task.id().clone()) {
                    warn!("Duplicate task id {}; assigning a new one", task.id());
                    task.reassign_id();
                    seen.insert(task.id().clone());
                }
                Some(task)
            })
            .collect();

        if damaged {
            self.storage.preserve_damaged();
        }

        debug!(
            "Loaded {} task(s) for profile '{}'",
            self.tasks.len(),
            self.storage.profile()
        );
    }

    /// Write every task to the record, replacing its previous contents.
    pub fn save(&self) -> Result<()> {
        self.storage.save(&self.tasks)
    }

    pub fn add_task(&mut self, name: &str, min_threshold: i64, max_threshold: i64) -> Result<Task> {
        self.add_task_at(name, min_threshold, max_threshold, Utc::now())
    }

    pub fn add_task_at(
        &mut self,
        name: &str,
        min_threshold: i64,
        max_threshold: i64,
        now: DateTime<Utc>,
    ) -> Result<Task> {
        let task = Task::new_at(name, min_threshold, max_threshold, now)?;
        self.tasks.push(task.clone());

        if let Err(e) = self.save() {
            self.tasks.pop();
            return Err(e);
        }

        info!("Added task '{}' ({})", task.name(), task.id());
        Ok(task)
    }

    /// Mark a task done: restart its clock and bump its success count.
    pub fn reset_task(&mut self, id: &TaskId) -> Result<Task> {
        self.reset_task_at(id, Utc::now())
    }

    pub fn reset_task_at(&mut self, id: &TaskId, now: DateTime<Utc>) -> Result<Task> {
        let idx = self.position(id)?;
        let previous = self.tasks[idx].clone();
        self.tasks[idx].reset(now);

        if let Err(e) = self.save() {
            self.tasks[idx] = previous;
            return Err(e);
        }

        let task = self.tasks[idx].clone();
        info!(
            "Reset task '{}' (success count {})",
            task.name(),
            task.success_count()
        );
        Ok(task)
    }

    pub fn delete_task(&mut self, id: &TaskId) -> Result<Task> {
        let idx = self.position(id)?;
        let removed = self.tasks.remove(idx);

        if let Err(e) = self.save() {
            self.tasks.insert(idx, removed);
            return Err(e);
        }

        info!("Deleted task '{}' ({})", removed.name(), removed.id());
        Ok(removed)
    }

    /// Snapshot of all tasks in insertion order.
    pub fn list_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn position(&self, id: &TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}
