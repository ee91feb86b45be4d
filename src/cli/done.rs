//! `overdue done` command implementation

use anyhow::Result;
use clap::Args;

use crate::store::{Storage, TaskStore};
use crate::task::format_elapsed;

#[derive(Args)]
pub struct DoneArgs {
    /// Task ID, ID prefix, or name
    identifier: String,
}

pub async fn run(profile: &str, args: DoneArgs) -> Result<()> {
    let mut store = TaskStore::open(Storage::new(profile)?);

    let (id, waited) = {
        let task = super::resolve_task(&args.identifier, store.tasks())?;
        (task.id().clone(), task.elapsed_at(chrono::Utc::now()))
    };

    let task = store.reset_task(&id)?;
    println!(
        "'{}' has been reset! Success count: {}",
        task.name(),
        task.success_count()
    );
    println!("  Last done {} ago", format_elapsed(waited));

    Ok(())
}
