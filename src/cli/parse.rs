//! CLI parse: clap types for kubehello. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kubehello - greet Kubernetes resources from manifests or a cluster snapshot
#[derive(Parser)]
#[command(name = "kubehello")]
#[command(about = "Say hello to Kubernetes resources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Object store directory for type/name lookups (overrides context.store)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Say hello to resources from files or type/name arguments
    Hello {
        /// Filename, directory, or URL of manifests; `-` reads stdin
        #[arg(short = 'f', long = "filename")]
        filenames: Vec<String>,

        /// Process directories given with -f recursively
        #[arg(short = 'R', long)]
        recursive: bool,

        /// Process a kustomization directory
        #[arg(short = 'k', long)]
        kustomize: Option<PathBuf>,

        /// Output format (name, json, yaml, table)
        #[arg(short = 'o', long)]
        output: Option<String>,

        /// Namespace scope for this request
        #[arg(short = 'n', long)]
        namespace: Option<String>,

        /// Look across all namespaces
        #[arg(short = 'A', long)]
        all_namespaces: bool,

        /// TYPE[/NAME] or TYPE NAME... arguments
        args: Vec<String>,
    },
    /// Print a plain greeting
    HelloWorld,
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    View,
}
