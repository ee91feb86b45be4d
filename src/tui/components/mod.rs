//! TUI components

mod gradient;
mod help;
mod text_input;

pub use gradient::render_gradient;
pub use help::HelpOverlay;
pub use text_input::render_text_field;
