//! Top-level clap definitions

use clap::{Parser, Subcommand};

use super::add::AddArgs;
use super::color::ColorArgs;
use super::done::DoneArgs;
use super::list::ListArgs;
use super::profile::ProfileCommands;
use super::remove::RemoveArgs;

/// Track recurring chores and see at a glance which ones are overdue.
///
/// Run without a command to open the dashboard.
#[derive(Parser)]
#[command(name = "overdue", version, about, long_about = None)]
pub struct Cli {
    /// Profile to use (defaults to the configured default profile)
    #[arg(short = 'p', long, global = true, env = "OVERDUE_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a recurring task
    Add(AddArgs),

    /// List tasks with their current urgency
    #[command(alias = "ls")]
    List(ListArgs),

    /// Mark a task done, restarting its clock
    #[command(alias = "reset")]
    Done(DoneArgs),

    /// Remove a task
    #[command(alias = "rm")]
    Remove(RemoveArgs),

    /// Show the color for an elapsed time and threshold pair
    Color(ColorArgs),

    /// Manage profiles
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommands>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
