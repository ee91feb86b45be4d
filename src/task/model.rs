//! Task data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::urgency::{self, Rgb, UrgencyError};

/// Bad task name or thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Stable task identifier, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 characters, enough to disambiguate in listings.
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A recurring obligation.
///
/// Fields are private: only the store mutates a task, and only through
/// [`Task::reset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Records written without an id get a fresh one when loaded
    #[serde(default = "TaskId::generate")]
    id: TaskId,

    name: String,

    /// Seconds since last reset before the task starts warming up
    min_threshold: i64,

    /// Seconds since last reset at which the task is fully overdue
    max_threshold: i64,

    #[serde(default)]
    success_count: u64,

    last_updated: DateTime<Utc>,
}

impl Task {
    /// Create a task whose clock starts now.
    pub fn new(name: &str, min_threshold: i64, max_threshold: i64) -> Result<Self, ValidationError> {
        Self::new_at(name, min_threshold, max_threshold, Utc::now())
    }

    /// Create a task whose clock started at `last_updated`.
    pub fn new_at(
        name: &str,
        min_threshold: i64,
        max_threshold: i64,
        last_updated: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        validate(name, min_threshold, max_threshold)?;
        Ok(Self {
            id: TaskId::generate(),
            name: name.to_string(),
            min_threshold,
            max_threshold,
            success_count: 0,
            last_updated,
        })
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_threshold(&self) -> i64 {
        self.min_threshold
    }

    pub fn max_threshold(&self) -> i64 {
        self.max_threshold
    }

    pub fn success_count(&self) -> u64 {
        self.success_count
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Re-check invariants on a task that came from disk.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(&self.name, self.min_threshold, self.max_threshold)
    }

    pub fn elapsed_at(&self, now: DateTime<Utc>) -> f64 {
        urgency::elapsed_seconds(self.last_updated, now)
    }

    pub fn color_at(&self, now: DateTime<Utc>) -> Result<Rgb, UrgencyError> {
        urgency::compute_color(self.elapsed_at(now), self.min_threshold, self.max_threshold)
    }

    /// Record one completion. Every call counts.
    pub(crate) fn reset(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
        self.success_count += 1;
    }

    pub(crate) fn reassign_id(&mut self) {
        self.id = TaskId::generate();
    }
}

fn validate(name: &str, min_threshold: i64, max_threshold: i64) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError("Task name cannot be empty".to_string()));
    }
    if min_threshold >= max_threshold {
        return Err(ValidationError(format!(
            "Minimum threshold ({}s) must be less than maximum threshold ({}s)",
            min_threshold, max_threshold
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_task_defaults() {
        let before = Utc::now();
        let task = Task::new("water plants", 60, 120).unwrap();
        assert_eq!(task.name(), "water plants");
        assert_eq!(task.min_threshold(), 60);
        assert_eq!(task.max_threshold(), 120);
        assert_eq!(task.success_count(), 0);
        assert!(task.last_updated() >= before);
    }

    #[test]
    fn test_new_trims_name() {
        let task = Task::new("  laundry \n", 1, 2).unwrap();
        assert_eq!(task.name(), "laundry");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Task::new("", 1, 10).is_err());
        assert!(Task::new("   ", 1, 10).is_err());
    }

    #[test]
    fn test_min_not_below_max_rejected() {
        let err = Task::new("x", 10, 5).unwrap_err();
        assert!(err.to_string().contains("must be less than"));
        assert!(Task::new("x", 5, 5).is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Task::new("same", 1, 2).unwrap();
        let b = Task::new("same", 1, 2).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id().short().len(), 8);
    }

    #[test]
    fn test_reset_increments_and_moves_clock() {
        let start = Utc::now() - Duration::hours(3);
        let mut task = Task::new_at("stretch", 60, 120, start).unwrap();
        let now = Utc::now();

        task.reset(now);
        task.reset(now);

        assert_eq!(task.success_count(), 2);
        assert_eq!(task.last_updated(), now);
    }

    #[test]
    fn test_elapsed_and_color() {
        let now = Utc::now();
        let task = Task::new_at("stretch", 60, 120, now - Duration::seconds(90)).unwrap();
        assert_eq!(task.elapsed_at(now), 90.0);
        assert_eq!(task.color_at(now).unwrap(), urgency::BRIGHT_RED);
    }

    #[test]
    fn test_deserialize_without_id_or_count() {
        let json = r#"{
            "name": "floss",
            "min_threshold": 10,
            "max_threshold": 20,
            "last_updated": "2024-03-01T08:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.name(), "floss");
        assert_eq!(task.success_count(), 0);
        assert!(!task.id().as_str().is_empty());
        assert!(task.validate().is_ok());
    }

    #[test]
    fn test_validate_catches_hand_edited_record() {
        let json = r#"{
            "id": "abc",
            "name": "broken",
            "min_threshold": 20,
            "max_threshold": 10,
            "success_count": 1,
            "last_updated": "2024-03-01T08:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.validate().is_err());
    }
}
