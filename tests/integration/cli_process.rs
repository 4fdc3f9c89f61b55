//! Process-level tests for the kubehello binary: exit codes, stdout, stderr.

use super::test_utils::{pod, put_store_object};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Run the binary with an isolated config home so no user config leaks in.
fn kubehello(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kubehello"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("HOME", home.join("home"))
        .env_remove("KUBEHELLO_LOG")
        .env_remove("KUBEHELLO_CONTEXT__NAMESPACE")
        .env_remove("KUBEHELLO_CONTEXT__STORE")
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_hello_file_succeeds() {
    let temp = TempDir::new().unwrap();
    let pod = temp.path().join("pod.yaml");
    fs::write(&pod, "kind: Pod\nmetadata:\n  name: web-1\n").unwrap();

    let output = kubehello(temp.path(), &["hello", "-f", pod.to_str().unwrap()]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(stdout(&output), "Hello Pod web-1 \npod/web-1\n");
}

#[test]
fn test_conflicting_input_exits_non_zero() {
    let temp = TempDir::new().unwrap();
    let output = kubehello(temp.path(), &["hello", "-f", "pod.yaml", "pod/web-1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains(
        "error: cannot provide both arguments (type/name) and file input (--filename or -f)"
    ));
}

#[test]
fn test_missing_input_exits_non_zero() {
    let temp = TempDir::new().unwrap();
    let output = kubehello(temp.path(), &["hello"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(
        "error: must provide either arguments (type/name) or file input (--filename or -f)"
    ));
}

#[test]
fn test_store_lookup_partial_failure_keeps_output() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("snapshot");
    put_store_object(&store, "pods", &pod("default", "web-1", "2024-03-01T10:00:00Z", "nginx:1.25"));

    let output = kubehello(
        temp.path(),
        &["--store", store.to_str().unwrap(), "hello", "pod/missing", "pod/web-1"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "Hello Pod web-1 2024-03-01 10:00:00 +0000 UTC nginx:1.25\npod/web-1\n"
    );
    assert!(stderr(&output).contains("error: pods \"missing\" not found"));
}

#[test]
fn test_stdin_manifest() {
    let temp = TempDir::new().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_kubehello"))
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("HOME", temp.path().join("home"))
        .args(["hello", "-f", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"{\"kind\": \"Service\", \"metadata\": {\"name\": \"front\"}}")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert_eq!(stdout(&output), "Hello Service front \nservice/front\n");
}

#[test]
fn test_config_file_supplies_namespace_and_format() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("snapshot");
    put_store_object(&store, "pods", &pod("staging", "web-1", "2024-04-01T00:00:00Z", "nginx:1.27"));
    let config = temp.path().join("kubehello.toml");
    fs::write(
        &config,
        format!(
            "[context]\nnamespace = \"staging\"\nstore = {:?}\n\n[output]\nformat = \"json\"\n",
            store.to_str().unwrap()
        ),
    )
    .unwrap();

    let output = kubehello(
        temp.path(),
        &["--config", config.to_str().unwrap(), "hello", "pods"],
    );
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Hello Pod web-1 2024-04-01 00:00:00 +0000 UTC nginx:1.27\n"));
    assert!(out.contains("\"namespace\": \"staging\""));
}

#[test]
fn test_unsupported_output_format() {
    let temp = TempDir::new().unwrap();
    let output = kubehello(temp.path(), &["hello", "-o", "xml", "-f", "pod.yaml"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).starts_with("error: "));
}

#[test]
fn test_hello_world() {
    let temp = TempDir::new().unwrap();
    let output = kubehello(temp.path(), &["hello-world"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Hello World\n");
}

#[test]
fn test_default_logging_keeps_stdout_clean() {
    let temp = TempDir::new().unwrap();
    let output = kubehello(temp.path(), &["--verbose", "hello-world"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Hello World\n");
    assert!(stderr(&output).contains("kubehello starting"));
}

#[test]
fn test_missing_input_wins_over_unusable_store() {
    let temp = TempDir::new().unwrap();
    let store = temp.path().join("no-such-snapshot");
    let output = kubehello(temp.path(), &["--store", store.to_str().unwrap(), "hello"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(
        "error: must provide either arguments (type/name) or file input (--filename or -f)"
    ));
}
