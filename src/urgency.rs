//! Urgency colors - maps time since a task was last done onto a gradient
//!
//! A task stays light green until its minimum threshold passes, warms to
//! bright red halfway between the thresholds, and fades to black once the
//! maximum threshold is reached.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::task::{Task, TaskId};

pub const LIGHT_GREEN: Rgb = Rgb::new(144, 238, 144);
pub const BRIGHT_RED: Rgb = Rgb::new(255, 0, 0);
pub const BLACK: Rgb = Rgb::new(0, 0, 0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrgencyError {
    #[error("Invalid threshold range: min ({min}) must be less than max ({max})")]
    InvalidRange { min: i64, max: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear blend towards `to`; `fraction` is clamped to `[0, 1]`.
    fn lerp(self, to: Rgb, fraction: f64) -> Rgb {
        let t = fraction.clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| -> u8 {
            let value = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            channel(self.r, to.r),
            channel(self.g, to.g),
            channel(self.b, to.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Where a task sits on the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Minimum threshold not reached yet
    Fresh,
    /// Between the minimum threshold and the midpoint
    Warming,
    /// Past the midpoint
    Critical,
    /// Maximum threshold reached
    Overdue,
}

impl Phase {
    pub fn of(elapsed: f64, min: i64, max: i64) -> Result<Self, UrgencyError> {
        let proportion = proportion(elapsed, min, max)?;
        Ok(match proportion {
            None => Phase::Fresh,
            Some(p) if p < 0.5 => Phase::Warming,
            Some(p) if p < 1.0 => Phase::Critical,
            Some(_) => Phase::Overdue,
        })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Fresh => "fresh",
            Phase::Warming => "warming",
            Phase::Critical => "critical",
            Phase::Overdue => "overdue",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position between the thresholds, clamped to `[0, 1]`, or `None` while the
/// task is still fresh.
fn proportion(elapsed: f64, min: i64, max: i64) -> Result<Option<f64>, UrgencyError> {
    if min >= max {
        return Err(UrgencyError::InvalidRange { min, max });
    }

    let min_f = min as f64;
    if elapsed < min_f {
        return Ok(None);
    }

    let span = (max - min) as f64;
    let clamped = (elapsed - min_f).min(span);
    Ok(Some(clamped / span))
}

/// Color for a task last done `elapsed` seconds ago with thresholds
/// `min`..`max` (seconds).
///
/// Channels are rounded to the nearest integer, which keeps the exact
/// anchors (light green at or below `min`, red at the midpoint, black at or
/// beyond `max`) and never revisits a color as `elapsed` grows.
pub fn compute_color(elapsed: f64, min: i64, max: i64) -> Result<Rgb, UrgencyError> {
    let Some(proportion) = proportion(elapsed, min, max)? else {
        return Ok(LIGHT_GREEN);
    };

    if proportion < 0.5 {
        Ok(LIGHT_GREEN.lerp(BRIGHT_RED, proportion * 2.0))
    } else {
        Ok(BRIGHT_RED.lerp(BLACK, (proportion - 0.5) * 2.0))
    }
}

/// Seconds between `last_updated` and `now`. A clock that moved backwards
/// counts as zero.
pub fn elapsed_seconds(last_updated: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - last_updated).num_milliseconds();
    (millis.max(0) as f64) / 1000.0
}

/// Display state for one task at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Urgency {
    pub id: TaskId,
    pub elapsed: f64,
    pub color: Rgb,
    pub phase: Phase,
}

impl Urgency {
    pub fn of(task: &Task, now: DateTime<Utc>) -> Result<Self, UrgencyError> {
        let elapsed = task.elapsed_at(now);
        Ok(Self {
            id: task.id().clone(),
            elapsed,
            color: task.color_at(now)?,
            phase: Phase::of(elapsed, task.min_threshold(), task.max_threshold())?,
        })
    }
}

/// Recompute display state for every task, in order. Called on each UI tick.
pub fn recolor(tasks: &[Task], now: DateTime<Utc>) -> Vec<Urgency> {
    tasks
        .iter()
        .filter_map(|task| match Urgency::of(task, now) {
            Ok(urgency) => Some(urgency),
            Err(e) => {
                warn!("Skipping task '{}': {}", task.name(), e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn color(elapsed: f64) -> Rgb {
        compute_color(elapsed, 100, 300).unwrap()
    }

    #[test]
    fn test_fresh_before_min() {
        for elapsed in [0.0, 1.0, 50.5, 99.0, 99.999] {
            assert_eq!(color(elapsed), LIGHT_GREEN, "elapsed {elapsed}");
        }
    }

    #[test]
    fn test_exactly_min_is_light_green() {
        assert_eq!(color(100.0), LIGHT_GREEN);
    }

    #[test]
    fn test_black_at_and_after_max() {
        for elapsed in [300.0, 301.0, 10_000.0, f64::MAX] {
            assert_eq!(color(elapsed), BLACK, "elapsed {elapsed}");
        }
    }

    #[test]
    fn test_midpoint_is_bright_red() {
        assert_eq!(color(200.0), BRIGHT_RED);
        // Odd span: the midpoint is fractional
        assert_eq!(compute_color(3.5, 0, 7).unwrap(), BRIGHT_RED);
        assert_eq!(compute_color(15.0 + 5.0 / 2.0, 15, 20).unwrap(), BRIGHT_RED);
    }

    #[test]
    fn test_invalid_range() {
        assert_eq!(
            compute_color(5.0, 10, 5),
            Err(UrgencyError::InvalidRange { min: 10, max: 5 })
        );
        assert_eq!(
            compute_color(5.0, 10, 10),
            Err(UrgencyError::InvalidRange { min: 10, max: 10 })
        );
        assert!(Phase::of(1.0, 3, 3).is_err());
    }

    #[test]
    fn test_quarter_way_is_between_green_and_red() {
        // proportion 0.25 -> halfway from light green to red
        let c = color(150.0);
        assert_eq!(c, Rgb::new(200, 119, 72));
    }

    #[test]
    fn test_continuous_across_phase_boundary() {
        let step = 0.01;
        let mut elapsed = 195.0;
        let mut prev = color(elapsed);
        while elapsed < 205.0 {
            elapsed += step;
            let next = color(elapsed);
            assert!(prev.r.abs_diff(next.r) <= 1, "{prev} -> {next} at {elapsed}");
            assert!(prev.g.abs_diff(next.g) <= 1, "{prev} -> {next} at {elapsed}");
            assert!(prev.b.abs_diff(next.b) <= 1, "{prev} -> {next} at {elapsed}");
            prev = next;
        }
    }

    #[test]
    fn test_green_channel_non_increasing() {
        let mut prev = color(100.0);
        let mut elapsed = 100.0;
        while elapsed <= 300.0 {
            let next = color(elapsed);
            assert!(next.g <= prev.g, "green rose at {elapsed}: {prev} -> {next}");
            prev = next;
            elapsed += 0.25;
        }
    }

    #[test]
    fn test_trajectory_never_revisits_a_color() {
        let mut seen: Vec<Rgb> = Vec::new();
        let mut elapsed = 100.0;
        while elapsed <= 300.0 {
            let c = color(elapsed);
            if seen.last() != Some(&c) {
                assert!(!seen.contains(&c), "color {c} revisited at {elapsed}");
                seen.push(c);
            }
            elapsed += 0.05;
        }
        assert_eq!(seen.first(), Some(&LIGHT_GREEN));
        assert_eq!(seen.last(), Some(&BLACK));
        assert!(seen.contains(&BRIGHT_RED));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(LIGHT_GREEN.to_hex(), "#90ee90");
        assert_eq!(BRIGHT_RED.to_hex(), "#ff0000");
        assert_eq!(BLACK.to_string(), "#000000");
        assert_eq!(Rgb::new(1, 10, 171).to_hex(), "#010aab");
    }

    #[test]
    fn test_phase_of() {
        assert_eq!(Phase::of(50.0, 100, 300).unwrap(), Phase::Fresh);
        assert_eq!(Phase::of(100.0, 100, 300).unwrap(), Phase::Warming);
        assert_eq!(Phase::of(199.9, 100, 300).unwrap(), Phase::Warming);
        assert_eq!(Phase::of(200.0, 100, 300).unwrap(), Phase::Critical);
        assert_eq!(Phase::of(299.9, 100, 300).unwrap(), Phase::Critical);
        assert_eq!(Phase::of(300.0, 100, 300).unwrap(), Phase::Overdue);
        assert_eq!(Phase::of(9000.0, 100, 300).unwrap(), Phase::Overdue);
    }

    #[test]
    fn test_elapsed_seconds() {
        let then = Utc::now();
        assert_eq!(elapsed_seconds(then, then + Duration::milliseconds(1500)), 1.5);
        assert_eq!(elapsed_seconds(then, then - Duration::seconds(30)), 0.0);
    }

    #[test]
    fn test_recolor_preserves_order() {
        let now = Utc::now();
        let tasks = vec![
            Task::new_at("water plants", 10, 20, now - Duration::seconds(5)).unwrap(),
            Task::new_at("call mom", 10, 20, now - Duration::seconds(15)).unwrap(),
            Task::new_at("backups", 10, 20, now - Duration::seconds(25)).unwrap(),
        ];

        let urgencies = recolor(&tasks, now);

        assert_eq!(urgencies.len(), 3);
        for (task, urgency) in tasks.iter().zip(&urgencies) {
            assert_eq!(&urgency.id, task.id());
        }
        assert_eq!(urgencies[0].color, LIGHT_GREEN);
        assert_eq!(urgencies[0].phase, Phase::Fresh);
        assert_eq!(urgencies[1].color, BRIGHT_RED);
        assert_eq!(urgencies[1].phase, Phase::Critical);
        assert_eq!(urgencies[2].color, BLACK);
        assert_eq!(urgencies[2].phase, Phase::Overdue);
    }

    #[test]
    fn test_recolor_is_pure() {
        let now = Utc::now();
        let tasks = vec![Task::new_at("stretch", 60, 120, now - Duration::seconds(90)).unwrap()];
        assert_eq!(recolor(&tasks, now), recolor(&tasks, now));
    }
}
