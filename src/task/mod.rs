//! Recurring task model
//!
//! - `Task`: name, threshold pair, last completion time and success counter
//! - Threshold input parsing (`90`, `45m`, `3d`, ...)

pub mod model;
pub mod threshold;

pub use model::{Task, TaskId, ValidationError};
pub use threshold::{format_elapsed, format_threshold, parse_threshold};
