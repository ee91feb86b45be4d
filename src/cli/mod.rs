//! CLI command implementations

pub mod add;
pub mod color;
pub mod definition;
pub mod done;
pub mod list;
pub mod profile;
pub mod remove;

pub use definition::{Cli, Commands};

use crate::task::Task;
use anyhow::{bail, Result};
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Find a task by exact id, exact name, or unique id prefix, in that order.
pub fn resolve_task<'a>(identifier: &str, tasks: &'a [Task]) -> Result<&'a Task> {
    if let Some(task) = tasks.iter().find(|t| t.id().as_str() == identifier) {
        return Ok(task);
    }

    let by_name: Vec<&Task> = tasks.iter().filter(|t| t.name() == identifier).collect();
    match by_name.as_slice() {
        [task] => return Ok(task),
        [] => {}
        _ => bail!(
            "'{}' matches {} tasks; use the task ID instead (see `overdue list`)",
            identifier,
            by_name.len()
        ),
    }

    if identifier.is_empty() {
        bail!("Task not found: {}", identifier);
    }

    let by_prefix: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.id().as_str().starts_with(identifier))
        .collect();
    match by_prefix.as_slice() {
        [task] => Ok(task),
        [] => bail!("Task not found: {}", identifier),
        _ => bail!(
            "ID prefix '{}' matches {} tasks; give more characters",
            identifier,
            by_prefix.len()
        ),
    }
}

/// Truncate to `max` display columns, ending in `...` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }

    let (budget, ellipsis) = if max <= 3 { (max, "") } else { (max - 3, "...") };
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(ellipsis);
    out
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` is no.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
