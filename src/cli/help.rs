//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::{Commands, ConfigCommands};

/// Command name string for log records (e.g. "hello", "config.view").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Hello { .. } => "hello".to_string(),
        Commands::HelloWorld => "hello-world".to_string(),
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
    }
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::View => "view",
    }
}
