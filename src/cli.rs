//! CLI domain: parse, route, help, and output only.
//! No domain orchestration; the route table dispatches to command services.

mod help;
mod output;
mod parse;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, ConfigCommands};
pub use route::RunContext;
