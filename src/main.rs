//! overdue - Recurring task tracker with urgency colors

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use overdue::cli::{self, Cli, Commands};
use overdue::store::get_default_profile;
use overdue::tui;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("OVERDUE_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("overdue=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    // Commands that never touch the app directory
    match cli.command {
        Some(Commands::Completion { shell }) => {
            generate(shell, &mut Cli::command(), "overdue", &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Color(args)) => return cli::color::run(args).await,
        _ => {}
    }

    let profile = cli
        .profile
        .filter(|p| !p.is_empty())
        .unwrap_or_else(get_default_profile);

    match cli.command {
        Some(Commands::Add(args)) => cli::add::run(&profile, args).await,
        Some(Commands::List(args)) => cli::list::run(&profile, args).await,
        Some(Commands::Done(args)) => cli::done::run(&profile, args).await,
        Some(Commands::Remove(args)) => cli::remove::run(&profile, args).await,
        Some(Commands::Profile { command }) => cli::profile::run(command).await,
        None => tui::run(&profile).await,
        Some(Commands::Completion { .. }) | Some(Commands::Color(_)) => unreachable!(),
    }
}
