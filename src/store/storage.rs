//! Task record storage - JSON file persistence

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::error::{Result, StoreError};
use super::{get_profile_dir, DEFAULT_PROFILE};
use crate::task::Task;

const RECORD_FILE: &str = "tasks.json";
const DAMAGED_SUFFIX: &str = ".corrupt-";

/// Tasks decoded from the record, plus how many entries could not be.
#[derive(Debug, Default)]
pub struct LoadedRecord {
    pub tasks: Vec<Task>,
    pub skipped: usize,
}

pub struct Storage {
    profile: String,
    tasks_path: PathBuf,
}

impl Storage {
    pub fn new(profile: &str) -> anyhow::Result<Self> {
        let profile_name = if profile.is_empty() {
            DEFAULT_PROFILE.to_string()
        } else {
            profile.to_string()
        };

        let profile_dir = get_profile_dir(&profile_name)?;
        let tasks_path = profile_dir.join(RECORD_FILE);

        Ok(Self {
            profile: profile_name,
            tasks_path,
        })
    }

    /// Storage backed by an explicit file instead of the profile directory.
    pub fn with_path(profile: &str, tasks_path: impl Into<PathBuf>) -> Self {
        Self {
            profile: profile.to_string(),
            tasks_path: tasks_path.into(),
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn path(&self) -> &Path {
        &self.tasks_path
    }

    pub fn backup_path(&self) -> PathBuf {
        self.tasks_path.with_extension("json.bak")
    }

    /// Read the record. A missing or blank file is an empty list; a file
    /// that is not a JSON array is an error. Entries that do not decode as
    /// tasks are skipped one by one and counted.
    pub fn load(&self) -> Result<LoadedRecord> {
        if !self.tasks_path.exists() {
            debug!("No task record at {}", self.tasks_path.display());
            return Ok(LoadedRecord::default());
        }

        let content = fs::read_to_string(&self.tasks_path).map_err(|source| StoreError::Read {
            path: self.tasks_path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(LoadedRecord::default());
        }

        let entries: Vec<serde_json::Value> =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: self.tasks_path.clone(),
                source,
            })?;

        let mut record = LoadedRecord::default();
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Task>(entry) {
                Ok(task) => record.tasks.push(task),
                Err(e) => {
                    warn!(
                        "Skipping entry {} of {}: {}",
                        index,
                        self.tasks_path.display(),
                        e
                    );
                    record.skipped += 1;
                }
            }
        }
        Ok(record)
    }

    /// Copies of damaged records kept beside the record file.
    pub fn damaged_copies(&self) -> Vec<PathBuf> {
        let (Some(parent), Some(file_name)) =
            (self.tasks_path.parent(), self.tasks_path.file_name())
        else {
            return Vec::new();
        };
        let prefix = format!("{}{}", file_name.to_string_lossy(), DAMAGED_SUFFIX);

        let Ok(entries) = fs::read_dir(parent) else {
            return Vec::new();
        };
        let mut copies: Vec<PathBuf> = entries
            .flatten()
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(&prefix))
            .map(|entry| entry.path())
            .collect();
        copies.sort();
        copies
    }

    /// Keep the current record under a timestamped name that later saves
    /// never touch. A record already kept with identical contents is not
    /// copied again.
    pub fn preserve_damaged(&self) -> Option<PathBuf> {
        let content = fs::read(&self.tasks_path).ok()?;

        if let Some(existing) = self
            .damaged_copies()
            .into_iter()
            .find(|copy| fs::read(copy).is_ok_and(|kept| kept == content))
        {
            return Some(existing);
        }

        let mut name = self.tasks_path.file_name()?.to_os_string();
        name.push(format!(
            "{}{}",
            DAMAGED_SUFFIX,
            Utc::now().format("%Y%m%dT%H%M%S%3f")
        ));
        let target = self.tasks_path.with_file_name(name);

        match fs::write(&target, &content) {
            Ok(()) => {
                warn!("Kept the damaged task record at {}", target.display());
                Some(target)
            }
            Err(e) => {
                warn!("Failed to keep a copy of the damaged task record: {}", e);
                None
            }
        }
    }

    /// Overwrite the record with `tasks`, keeping the previous file as a backup.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.tasks_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::persistence(parent, e))?;
        }

        if self.tasks_path.exists() {
            if let Err(e) = fs::copy(&self.tasks_path, self.backup_path()) {
                warn!("Failed to create backup: {}", e);
            }
        }

        let content = serde_json::to_string_pretty(tasks)?;
        fs::write(&self.tasks_path, content)
            .map_err(|e| StoreError::persistence(&self.tasks_path, e))?;
        debug!(
            "Saved {} task(s) to {}",
            tasks.len(),
            self.tasks_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::tempdir;

    fn storage_in(dir: &Path) -> Storage {
        Storage::with_path("test", dir.join("tasks.json"))
    }

    #[test]
    fn test_storage_roundtrip() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());

        let tasks = vec![Task::new("dishes", 60, 120)?, Task::new("gym", 3600, 7200)?];

        storage.save(&tasks)?;
        let loaded = storage.load()?;

        assert_eq!(loaded.tasks, tasks);
        assert_eq!(loaded.skipped, 0);
        Ok(())
    }

    #[test]
    fn test_storage_with_path_profile_accessor() {
        let storage = Storage::with_path("work", "/tmp/overdue/tasks.json");
        assert_eq!(storage.profile(), "work");
        assert_eq!(storage.path(), Path::new("/tmp/overdue/tasks.json"));
        assert_eq!(
            storage.backup_path(),
            PathBuf::from("/tmp/overdue/tasks.json.bak")
        );
    }

    #[test]
    fn test_storage_load_nonexistent_file() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());
        assert!(storage.load()?.tasks.is_empty());
        Ok(())
    }

    #[test]
    fn test_storage_load_empty_file() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());
        fs::write(storage.path(), "")?;
        assert!(storage.load()?.tasks.is_empty());
        Ok(())
    }

    #[test]
    fn test_storage_load_whitespace_only_file() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());
        fs::write(storage.path(), "   \n  \t  ")?;
        assert!(storage.load()?.tasks.is_empty());
        Ok(())
    }

    #[test]
    fn test_storage_load_invalid_json() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());
        fs::write(storage.path(), "{ invalid json }")?;

        let result = storage.load();
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
        Ok(())
    }

    #[test]
    fn test_storage_save_creates_backup() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());

        storage.save(&[Task::new("first", 1, 2)?])?;
        storage.save(&[Task::new("second", 1, 2)?])?;

        let backup_content = fs::read_to_string(storage.backup_path())?;
        assert!(backup_content.contains("first"));
        assert!(!backup_content.contains("second"));
        Ok(())
    }

    #[test]
    fn test_storage_save_empty_array() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());
        storage.save(&[])?;

        let content = fs::read_to_string(storage.path())?;
        assert_eq!(content.trim(), "[]");
        Ok(())
    }

    #[test]
    fn test_storage_save_creates_missing_directories() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = Storage::with_path("test", temp.path().join("a/b/tasks.json"));
        storage.save(&[Task::new("nested", 1, 2)?])?;
        assert_eq!(storage.load()?.tasks.len(), 1);
        Ok(())
    }

    #[test]
    fn test_storage_save_failure_is_persistence_error() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "not a directory")?;

        let storage = Storage::with_path("test", blocker.join("tasks.json"));
        let err = storage.save(&[]).unwrap_err();
        assert!(err.is_persistence());
        Ok(())
    }

    #[test]
    fn test_storage_record_field_names() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());
        storage.save(&[Task::new("mow lawn", 7, 14)?])?;

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(storage.path())?)?;
        let record = &value[0];
        assert_eq!(record["name"], "mow lawn");
        assert_eq!(record["min_threshold"], 7);
        assert_eq!(record["max_threshold"], 14);
        assert_eq!(record["success_count"], 0);
        assert!(record["id"].is_string());
        assert!(record["last_updated"].is_string());
        Ok(())
    }

    #[test]
    fn test_storage_preserves_timestamps() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());

        let stamp = Utc::now() - Duration::days(4);
        let task = Task::new_at("taxes", 10, 20, stamp)?;
        storage.save(&[task])?;

        let loaded = storage.load()?;
        assert_eq!(loaded.tasks[0].last_updated(), stamp);
        Ok(())
    }

    #[test]
    fn test_storage_load_skips_undecodable_entries() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());
        fs::write(
            storage.path(),
            r#"[
                {"name": "good", "min_threshold": 1, "max_threshold": 2,
                 "last_updated": "2024-01-01T00:00:00Z"},
                {"name": "typo", "min_threshold": "60", "max_threshold": 120,
                 "last_updated": "2024-01-01T00:00:00Z"},
                42
            ]"#,
        )?;

        let loaded = storage.load()?;
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].name(), "good");
        assert_eq!(loaded.skipped, 2);
        Ok(())
    }

    #[test]
    fn test_storage_load_non_array_is_corrupt() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());
        fs::write(storage.path(), r#"{"name": "not a list"}"#)?;
        assert!(matches!(storage.load(), Err(StoreError::Corrupt { .. })));
        Ok(())
    }

    #[test]
    fn test_preserve_damaged_copies_once() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());
        fs::write(storage.path(), "garbage")?;

        let first = storage.preserve_damaged().unwrap();
        let again = storage.preserve_damaged().unwrap();
        assert_eq!(first, again);
        assert_eq!(storage.damaged_copies(), vec![first.clone()]);
        assert_eq!(fs::read_to_string(&first)?, "garbage");

        // Saves rotate the backup but leave the kept copy alone
        storage.save(&[Task::new("a", 1, 2)?])?;
        storage.save(&[Task::new("b", 1, 2)?])?;
        assert_eq!(fs::read_to_string(&first)?, "garbage");
        Ok(())
    }

    #[test]
    fn test_preserve_damaged_without_record() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let storage = storage_in(temp.path());
        assert!(storage.preserve_damaged().is_none());
        assert!(storage.damaged_copies().is_empty());
        Ok(())
    }
}
