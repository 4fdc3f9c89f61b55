//! Config facade: the single entry point for loading `KubeHelloConfig`.

use super::merge::merge_policy;
use super::sources::global_file;
use super::KubeHelloConfig;
use crate::error::ApiError;
use config::{File, FileFormat};
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration: defaults, global file, then environment.
    pub fn load() -> Result<KubeHelloConfig, ApiError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let config = builder.add_source(merge_policy::environment()).build()?;
        Self::finish(config.try_deserialize()?)
    }

    /// Load configuration from an explicit file instead of the global one.
    pub fn load_from_file(path: &Path) -> Result<KubeHelloConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        debug!(config_path = %path.display(), "Loading configuration file");
        let config = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(merge_policy::environment())
            .build()?;
        Self::finish(config.try_deserialize()?)
    }

    fn finish(config: KubeHelloConfig) -> Result<KubeHelloConfig, ApiError> {
        config.validate().map_err(|errors| {
            ApiError::ConfigError(format!("Invalid configuration: {}", errors.join("; ")))
        })?;
        Ok(config)
    }
}
