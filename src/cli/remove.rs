//! `overdue remove` command implementation

use anyhow::Result;
use clap::Args;

use crate::store::{Storage, TaskStore};

#[derive(Args)]
pub struct RemoveArgs {
    /// Task ID, ID prefix, or name
    identifier: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

pub async fn run(profile: &str, args: RemoveArgs) -> Result<()> {
    let mut store = TaskStore::open(Storage::new(profile)?);

    let (id, name) = {
        let task = super::resolve_task(&args.identifier, store.tasks())?;
        (task.id().clone(), task.name().to_string())
    };

    if !args.yes && !super::confirm(&format!("Remove task '{}'?", name))? {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_task(&id)?;
    println!("✓ Removed task: {} ({})", name, id.short());

    Ok(())
}
