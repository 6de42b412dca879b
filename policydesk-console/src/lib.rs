//! Line-oriented terminal front-end for PolicyDesk.

mod command;
mod console;
mod render;

pub use command::{is_affirmative, parse_command, Command, CommandError, HELP};
pub use console::Console;
pub use render::{render_form, render_notice, render_table};
