//! `overdue add` command implementation

use anyhow::Result;
use clap::Args;

use crate::store::{Storage, TaskStore};
use crate::task::{format_threshold, parse_threshold};

#[derive(Args)]
pub struct AddArgs {
    /// Task name
    name: String,

    /// Time after which the task starts turning red (e.g. 90m, 2d, 3600)
    #[arg(long)]
    min: String,

    /// Time after which the task is fully overdue (e.g. 1w)
    #[arg(long)]
    max: String,
}

pub async fn run(profile: &str, args: AddArgs) -> Result<()> {
    let min = parse_threshold(&args.min)?;
    let max = parse_threshold(&args.max)?;

    let mut store = TaskStore::open(Storage::new(profile)?);
    let task = store.add_task(&args.name, min, max)?;

    println!("✓ Added task");
    println!("  Name:    {}", task.name());
    println!(
        "  Window:  {} .. {}",
        format_threshold(task.min_threshold()),
        format_threshold(task.max_threshold())
    );
    println!("  ID:      {}", task.id().short());
    println!("  Profile: {}", store.storage().profile());

    Ok(())
}
