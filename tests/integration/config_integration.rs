//! Integration tests for layered configuration loading.

use super::test_utils::with_xdg_env;
use kubehello::cli::RunContext;
use kubehello::config::{global_config_path, ConfigLoader};
use std::fs;
use tempfile::TempDir;

fn write_global_config(test_dir: &TempDir, contents: &str) {
    let dir = test_dir.path().join("kubehello");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_global_config_path_uses_xdg_config_home() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let path = global_config_path().unwrap();
        assert_eq!(path, test_dir.path().join("kubehello").join("config.toml"));
    });
}

#[test]
fn test_load_without_any_file_uses_defaults() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load().unwrap();
        assert!(config.context.namespace.is_none());
        assert!(config.context.store.is_none());
        assert_eq!(config.output.format, "name");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.output, "stderr");
    });
}

#[test]
fn test_global_config_file_is_loaded() {
    let test_dir = TempDir::new().unwrap();
    write_global_config(
        &test_dir,
        "[context]\nnamespace = \"team-a\"\n\n[output]\nformat = \"yaml\"\n\n[[kinds]]\nkind = \"Widget\"\nplural = \"widgets\"\nshort_names = [\"wd\"]\n",
    );
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.context.namespace.as_deref(), Some("team-a"));
        assert_eq!(config.output.format, "yaml");
        let registry = config.kind_registry();
        let widget = registry.lookup_resource("wd").unwrap();
        assert_eq!(widget.kind, "Widget");
        assert!(widget.namespaced);
    });
}

#[test]
fn test_environment_overrides_file() {
    let test_dir = TempDir::new().unwrap();
    write_global_config(&test_dir, "[context]\nnamespace = \"team-a\"\n");
    with_xdg_env(&test_dir, || {
        std::env::set_var("KUBEHELLO_CONTEXT__NAMESPACE", "team-b");
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.context.namespace.as_deref(), Some("team-b"));
    });
}

#[test]
fn test_invalid_global_config_is_reported() {
    let test_dir = TempDir::new().unwrap();
    write_global_config(&test_dir, "[output]\nformat = \"xml\"\n");
    with_xdg_env(&test_dir, || {
        let err = ConfigLoader::load().unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    });
}

#[test]
fn test_store_override_wins_over_config() {
    let test_dir = TempDir::new().unwrap();
    write_global_config(&test_dir, "[context]\nstore = \"/from/config\"\n");
    with_xdg_env(&test_dir, || {
        let context = RunContext::new(None, Some("/from/flag".into())).unwrap();
        assert_eq!(
            context.config().context.store.as_deref(),
            Some(std::path::Path::new("/from/flag"))
        );
    });
}
