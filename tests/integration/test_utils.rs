//! Shared test utilities for integration tests
//!
//! Centralizes environment isolation and fixture layout so tests that touch
//! process-wide state stay serialized.

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Serializes access to environment variables across tests in this binary.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after a test
struct EnvState {
    home: Option<String>,
    xdg_config_home: Option<String>,
    namespace: Option<String>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            home: std::env::var("HOME").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
            namespace: std::env::var("KUBEHELLO_CONTEXT__NAMESPACE").ok(),
        }
    }

    fn restore(self) {
        restore_var("HOME", self.home);
        restore_var("XDG_CONFIG_HOME", self.xdg_config_home);
        restore_var("KUBEHELLO_CONTEXT__NAMESPACE", self.namespace);
    }
}

fn restore_var(key: &str, value: Option<String>) {
    match value {
        Some(orig) => std::env::set_var(key, orig),
        None => std::env::remove_var(key),
    }
}

/// Run `f` with XDG_CONFIG_HOME and HOME pointed into `test_dir`.
///
/// The original environment is restored afterwards, and a global mutex keeps
/// parallel tests from observing each other's variables.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());
    std::env::remove_var("KUBEHELLO_CONTEXT__NAMESPACE");

    let result = f();

    env_state.restore();

    result
}

/// Write `object` into a directory store at its conventional location.
pub fn put_store_object(root: &Path, plural: &str, object: &Value) {
    let name = object["metadata"]["name"].as_str().unwrap();
    let dir = match object["metadata"]["namespace"].as_str() {
        Some(ns) => root.join("namespaces").join(ns).join(plural),
        None => root.join("cluster").join(plural),
    };
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(format!("{}.json", name)),
        serde_json::to_string_pretty(object).unwrap(),
    )
    .unwrap();
}

/// A pod object with a creation time and a single container image.
pub fn pod(namespace: &str, name: &str, created: &str, image: &str) -> Value {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "creationTimestamp": created
        },
        "spec": {"containers": [{"name": "main", "image": image}]}
    })
}
