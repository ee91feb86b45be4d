//! `overdue profile` subcommands implementation

use anyhow::{bail, Result};
use clap::Subcommand;

use crate::store::{self, Storage, TaskStore};

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List all profiles
    #[command(alias = "ls")]
    List,

    /// Create a new profile
    #[command(alias = "new")]
    Create {
        /// Profile name
        name: String,
    },

    /// Delete a profile and all of its tasks
    #[command(alias = "rm")]
    Delete {
        /// Profile name
        name: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show or set the default profile
    Default {
        /// Profile name (optional, shows current if not provided)
        name: Option<String>,
    },
}

pub async fn run(command: Option<ProfileCommands>) -> Result<()> {
    match command {
        Some(ProfileCommands::List) | None => list_profiles().await,
        Some(ProfileCommands::Create { name }) => create_profile(&name).await,
        Some(ProfileCommands::Delete { name, yes }) => delete_profile(&name, yes).await,
        Some(ProfileCommands::Default { name: Some(name) }) => set_default_profile(&name).await,
        Some(ProfileCommands::Default { name: None }) => show_default_profile().await,
    }
}

async fn list_profiles() -> Result<()> {
    let profiles = store::list_profiles()?;
    let default_profile = store::get_default_profile();

    if profiles.is_empty() {
        println!("No profiles found.");
        println!("Run 'overdue' to create the default profile automatically.");
        return Ok(());
    }

    println!("Profiles:");
    for p in &profiles {
        let count = Storage::new(p)
            .map(|storage| TaskStore::open(storage).len())
            .unwrap_or(0);
        if *p == default_profile {
            println!("  * {} (default, {} tasks)", p, count);
        } else {
            println!("    {} ({} tasks)", p, count);
        }
    }
    println!("\nTotal: {} profiles", profiles.len());

    Ok(())
}

async fn create_profile(name: &str) -> Result<()> {
    store::create_profile(name)?;
    println!("✓ Created profile: {}", name);
    println!("  Use with: overdue -p {}", name);
    Ok(())
}

async fn delete_profile(name: &str, yes: bool) -> Result<()> {
    let prompt = format!(
        "Are you sure you want to delete profile '{}'? This will remove all tasks in this profile.",
        name
    );
    if !yes && !super::confirm(&prompt)? {
        println!("Cancelled.");
        return Ok(());
    }

    store::delete_profile(name)?;
    println!("✓ Deleted profile: {}", name);
    Ok(())
}

async fn show_default_profile() -> Result<()> {
    println!("Default profile: {}", store::get_default_profile());
    Ok(())
}

async fn set_default_profile(name: &str) -> Result<()> {
    let profiles = store::list_profiles()?;
    if !profiles.iter().any(|p| p == name) {
        bail!("Profile '{}' does not exist", name);
    }

    store::set_default_profile(name)?;
    println!("✓ Default profile set to: {}", name);
    Ok(())
}
