//! kubehello CLI Binary
//!
//! Command-line interface for greeting Kubernetes resources.

use clap::Parser;
use kubehello::cli::{Cli, Commands, RunContext};
use kubehello::config::ConfigLoader;
use kubehello::error::{ApiError, RenderError};
use kubehello::logging::{init_logging, LoggingConfig};
use std::io::Write;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("kubehello starting");

    let context = match RunContext::new(cli.config.clone(), cli.store.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", kubehello::cli::map_error(&e));
            process::exit(1);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = run_command(&context, &cli.command, &mut out);

    if let Err(e) = result {
        error!("Command failed: {}", e);
        eprintln!("{}", kubehello::cli::map_error(&e));
        process::exit(1);
    }
    info!("Command completed successfully");
}

/// Execute the command and flush its output. A failed flush is a command failure.
fn run_command(context: &RunContext, command: &Commands, out: &mut dyn Write) -> Result<(), ApiError> {
    context.execute(command, out)?;
    out.flush().map_err(RenderError::Write)?;
    Ok(())
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load()
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
