//! overdue - recurring task tracker that colors each chore by how overdue it is

pub mod cli;
pub mod store;
pub mod task;
pub mod tui;
pub mod urgency;
