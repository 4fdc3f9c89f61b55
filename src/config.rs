//! Configuration System
//!
//! Layered configuration for kubehello: built-in defaults, a global or explicit
//! config file, then `KUBEHELLO_` environment variables. Supplies the
//! current-context namespace, the object store location, the default output
//! format, extra kinds, and logging settings.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::namespace::NamespaceSource;
use crate::printer::PrintFlags;
use crate::resource::kinds::{KindConfig, KindRegistry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KubeHelloConfig {
    /// Current context: namespace and object store
    #[serde(default)]
    pub context: ContextConfig,

    /// Output defaults
    #[serde(default)]
    pub output: OutputConfig,

    /// Extra kinds beyond the built-in set
    #[serde(default)]
    pub kinds: Vec<KindConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Current-context settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Namespace used when `--namespace` is not given
    #[serde(default)]
    pub namespace: Option<String>,

    /// Snapshot directory backing type/name lookups
    #[serde(default)]
    pub store: Option<PathBuf>,
}

impl NamespaceSource for ContextConfig {
    fn current_namespace(&self) -> Option<String> {
        self.namespace.clone()
    }
}

/// Output defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Printer used when `-o` is not given: name, json, yaml, table
    #[serde(default = "default_output_format")]
    pub format: String,
}

fn default_output_format() -> String {
    "name".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
        }
    }
}

impl KubeHelloConfig {
    /// Validate the configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = PrintFlags::new(&self.output.format) {
            errors.push(format!("output.format: {}", e));
        }
        if let Some(ns) = &self.context.namespace {
            if ns.trim().is_empty() {
                errors.push("context.namespace cannot be empty".to_string());
            }
        }
        for kind in &self.kinds {
            if kind.kind.trim().is_empty() {
                errors.push("kinds: kind name cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Built-in kinds plus configured ones.
    pub fn kind_registry(&self) -> KindRegistry {
        KindRegistry::builtin().with_configured(&self.kinds)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self)
            .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}
