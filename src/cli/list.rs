//! `overdue list` command implementation

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::store::{list_profiles, Storage, TaskStore};
use crate::task::{format_elapsed, Task};
use crate::urgency::{Phase, Urgency};

const TABLE_COL_NAME: usize = 24;
const TABLE_COL_DONE: usize = 6;
const TABLE_COL_ELAPSED: usize = 10;
const TABLE_COL_PHASE: usize = 9;
const TABLE_COL_COLOR: usize = 8;
const TABLE_COL_ID_DISPLAY: usize = 8;

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// List tasks from all profiles
    #[arg(long)]
    all: bool,
}

#[derive(Serialize)]
struct TaskJson {
    id: String,
    name: String,
    min_threshold: i64,
    max_threshold: i64,
    success_count: u64,
    last_updated: DateTime<Utc>,
    elapsed_seconds: f64,
    phase: Phase,
    color: String,
    profile: String,
}

impl TaskJson {
    fn new(task: &Task, urgency: &Urgency, profile: &str) -> Self {
        Self {
            id: task.id().to_string(),
            name: task.name().to_string(),
            min_threshold: task.min_threshold(),
            max_threshold: task.max_threshold(),
            success_count: task.success_count(),
            last_updated: task.last_updated(),
            elapsed_seconds: urgency.elapsed,
            phase: urgency.phase,
            color: urgency.color.to_hex(),
            profile: profile.to_string(),
        }
    }
}

fn print_table_header() {
    println!(
        "{:<width_name$} {:>width_done$} {:<width_elapsed$} {:<width_phase$} {:<width_color$} ID",
        "NAME",
        "DONE",
        "ELAPSED",
        "PHASE",
        "COLOR",
        width_name = TABLE_COL_NAME,
        width_done = TABLE_COL_DONE,
        width_elapsed = TABLE_COL_ELAPSED,
        width_phase = TABLE_COL_PHASE,
        width_color = TABLE_COL_COLOR,
    );
    println!(
        "{}",
        "-".repeat(
            TABLE_COL_NAME
                + TABLE_COL_DONE
                + TABLE_COL_ELAPSED
                + TABLE_COL_PHASE
                + TABLE_COL_COLOR
                + TABLE_COL_ID_DISPLAY
                + 5
        )
    );
}

fn print_table_row(task: &Task, urgency: &Urgency) {
    let name = super::truncate(task.name(), TABLE_COL_NAME);
    // Pad by display width so wide characters keep the columns aligned
    let pad = TABLE_COL_NAME.saturating_sub(UnicodeWidthStr::width(name.as_str()));
    println!(
        "{}{} {:>width_done$} {:<width_elapsed$} {:<width_phase$} {:<width_color$} {}",
        name,
        " ".repeat(pad),
        task.success_count(),
        format_elapsed(urgency.elapsed),
        urgency.phase,
        urgency.color.to_hex(),
        task.id().short(),
        width_done = TABLE_COL_DONE,
        width_elapsed = TABLE_COL_ELAPSED,
        width_phase = TABLE_COL_PHASE,
        width_color = TABLE_COL_COLOR,
    );
}

/// Tasks of one profile paired with their urgency right now.
fn snapshot(store: &TaskStore, now: DateTime<Utc>) -> Result<Vec<(Task, Urgency)>> {
    store
        .tasks()
        .iter()
        .map(|task| -> Result<(Task, Urgency)> {
            Ok((task.clone(), Urgency::of(task, now)?))
        })
        .collect()
}

pub async fn run(profile: &str, args: ListArgs) -> Result<()> {
    if args.all {
        return run_all_profiles(args.json).await;
    }

    let store = TaskStore::open(Storage::new(profile)?);
    let profile = store.storage().profile().to_string();
    let rows = snapshot(&store, Utc::now())?;

    if args.json {
        let tasks: Vec<TaskJson> = rows
            .iter()
            .map(|(task, urgency)| TaskJson::new(task, urgency, &profile))
            .collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No tasks found in profile '{}'.", profile);
        println!("Add one with: overdue add <name> --min <time> --max <time>");
        return Ok(());
    }

    println!("Profile: {}\n", profile);
    print_table_header();
    for (task, urgency) in &rows {
        print_table_row(task, urgency);
    }
    println!("\nTotal: {} tasks", rows.len());

    Ok(())
}

async fn run_all_profiles(json: bool) -> Result<()> {
    let profiles = list_profiles()?;

    if profiles.is_empty() {
        if json {
            println!("[]");
        } else {
            println!("No profiles found.");
        }
        return Ok(());
    }

    let now = Utc::now();
    let mut all_rows = Vec::new();
    for profile_name in &profiles {
        let Ok(storage) = Storage::new(profile_name) else {
            continue;
        };
        let store = TaskStore::open(storage);
        all_rows.push((profile_name.clone(), snapshot(&store, now)?));
    }

    if json {
        let tasks: Vec<TaskJson> = all_rows
            .iter()
            .flat_map(|(profile, rows)| {
                rows.iter()
                    .map(move |(task, urgency)| TaskJson::new(task, urgency, profile))
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    let mut total_tasks = 0;
    for (profile_name, rows) in &all_rows {
        if rows.is_empty() {
            continue;
        }

        println!("\n═══ Profile: {} ═══\n", profile_name);
        print_table_header();
        for (task, urgency) in rows {
            print_table_row(task, urgency);
        }
        println!("({} tasks)", rows.len());
        total_tasks += rows.len();
    }

    println!("\n═══════════════════════════════════════");
    println!(
        "Total: {} tasks across {} profiles",
        total_tasks,
        profiles.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_snapshot_pairs_tasks_with_urgency() {
        let temp = TempDir::new().unwrap();
        let mut store = TaskStore::open(Storage::with_path("test", temp.path().join("tasks.json")));
        let now = Utc::now();
        store.add_task_at("fresh", 100, 300, now).unwrap();
        store
            .add_task_at("late", 100, 300, now - Duration::seconds(400))
            .unwrap();

        let rows = snapshot(&store, now).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1.phase, Phase::Fresh);
        assert_eq!(rows[1].1.phase, Phase::Overdue);
        assert_eq!(rows[1].1.color.to_hex(), "#000000");
    }

    #[test]
    fn test_task_json_fields() {
        let now = Utc::now();
        let task = Task::new_at("dishes", 100, 300, now - Duration::seconds(200)).unwrap();
        let urgency = Urgency::of(&task, now).unwrap();

        let value = serde_json::to_value(TaskJson::new(&task, &urgency, "home")).unwrap();
        assert_eq!(value["name"], "dishes");
        assert_eq!(value["phase"], "critical");
        assert_eq!(value["color"], "#ff0000");
        assert_eq!(value["profile"], "home");
        assert_eq!(value["elapsed_seconds"], 200.0);
    }
}
