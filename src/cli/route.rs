//! CLI route: single route table and run context. Dispatches to command services.

use crate::cli::command_name;
use crate::cli::parse::{Commands, ConfigCommands};
use crate::config::{ConfigLoader, KubeHelloConfig};
use crate::error::ApiError;
use crate::hello::{HelloCommandService, HelloEnv, HelloOptions};
use crate::input::{FilenameOptions, InputMode};
use crate::printer::PrintFlags;
use crate::resource::{DirectoryStore, KindRegistry, ObjectStore};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded configuration and kind registry.
/// Built from an optional config path and store override using ConfigLoader only.
pub struct RunContext {
    config: KubeHelloConfig,
    kinds: KindRegistry,
}

impl RunContext {
    /// Create run context. `--store` takes precedence over `context.store`.
    pub fn new(
        config_path: Option<PathBuf>,
        store_override: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let mut config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        if store_override.is_some() {
            config.context.store = store_override;
        }
        let kinds = config.kind_registry();
        debug!(kinds = kinds.len(), store = ?config.context.store, "Run context ready");
        Ok(Self { config, kinds })
    }

    /// Build a run context from an already loaded configuration.
    pub fn from_config(config: KubeHelloConfig) -> Self {
        let kinds = config.kind_registry();
        Self { config, kinds }
    }

    pub fn config(&self) -> &KubeHelloConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table, streaming output to `out`.
    pub fn execute(&self, command: &Commands, out: &mut dyn Write) -> Result<(), ApiError> {
        info!(command = %command_name(command), "Executing command");
        match command {
            Commands::Hello {
                filenames,
                recursive,
                kustomize,
                output,
                namespace,
                all_namespaces,
                args,
            } => {
                let options = HelloOptions {
                    filenames: FilenameOptions {
                        filenames: filenames.clone(),
                        kustomize: kustomize.clone(),
                        recursive: *recursive,
                    },
                    args: args.clone(),
                    namespace: namespace.clone(),
                    all_namespaces: *all_namespaces,
                };
                self.handle_hello(&options, output.as_deref(), out)
            }
            Commands::HelloWorld => HelloCommandService::hello_world(out),
            Commands::Config { command } => match command {
                ConfigCommands::View => self.handle_config_view(out),
            },
        }
    }

    fn handle_hello(
        &self,
        options: &HelloOptions,
        output: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<(), ApiError> {
        // Input errors win over format and store errors; only type/name input opens the store.
        let request = HelloCommandService::build_request(options, &self.config.context)?;
        let printers = PrintFlags::new(output.unwrap_or(&self.config.output.format))?;
        let store = match (&self.config.context.store, &request.input) {
            (Some(root), InputMode::TypeNameArgs(_)) => Some(DirectoryStore::open(root)?),
            _ => None,
        };

        let env = HelloEnv {
            kinds: &self.kinds,
            store: store.as_ref().map(|s| s as &dyn ObjectStore),
            namespaces: &self.config.context,
            printers: &printers,
        };
        let summary = HelloCommandService::execute(request, &env, out)?;
        info!(
            visited = summary.visited,
            reported = summary.reported,
            failed = summary.failed,
            "Hello completed"
        );
        Ok(())
    }

    fn handle_config_view(&self, out: &mut dyn Write) -> Result<(), ApiError> {
        let rendered = self.config.to_toml_string()?;
        out.write_all(rendered.as_bytes())
            .map_err(crate::error::RenderError::Write)?;
        Ok(())
    }
}
