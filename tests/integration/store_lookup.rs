//! Integration tests for type/name arguments resolved against a directory store.

use super::test_utils::{pod, put_store_object};
use kubehello::error::{ApiError, ResolveError};
use kubehello::hello::{HelloCommandService, HelloEnv, HelloOptions};
use kubehello::printer::PrintFlags;
use kubehello::resource::{DirectoryStore, KindRegistry};
use serde_json::json;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    store: DirectoryStore,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    put_store_object(root, "pods", &pod("default", "web-1", "2024-03-01T10:00:00Z", "nginx:1.25"));
    put_store_object(root, "pods", &pod("default", "b", "2024-03-02T08:30:00Z", "busybox:1.36"));
    put_store_object(root, "pods", &pod("default", "a", "2024-03-02T08:00:00Z", "redis:7"));
    put_store_object(root, "pods", &pod("staging", "web-1", "2024-04-01T00:00:00Z", "nginx:1.27"));
    put_store_object(
        root,
        "deployments",
        &json!({
            "kind": "Deployment",
            "metadata": {"name": "api", "namespace": "default", "creationTimestamp": "2024-01-01T00:00:00Z"},
            "spec": {"template": {"spec": {"containers": [{"image": "api:2"}, {"image": "proxy:1"}]}}}
        }),
    );
    put_store_object(
        root,
        "nodes",
        &json!({
            "kind": "Node",
            "metadata": {"name": "node-1", "creationTimestamp": "2023-12-31T23:59:59Z"}
        }),
    );
    let store = DirectoryStore::open(root).unwrap();
    Fixture { _dir: dir, store }
}

fn run(fixture: &Fixture, options: HelloOptions) -> (Result<usize, ApiError>, String) {
    let kinds = KindRegistry::builtin();
    let printers = PrintFlags::default();
    let env = HelloEnv {
        kinds: &kinds,
        store: Some(&fixture.store),
        namespaces: &None::<String>,
        printers: &printers,
    };
    let mut out = Vec::new();
    let result = HelloCommandService::run(&options, &env, &mut out).map(|s| s.reported);
    (result, String::from_utf8(out).unwrap())
}

fn args(tokens: &[&str]) -> HelloOptions {
    HelloOptions {
        args: tokens.iter().map(|t| t.to_string()).collect(),
        ..HelloOptions::default()
    }
}

#[test]
fn test_named_lookup_includes_creation_time_and_image() {
    let fixture = fixture();
    let (result, out) = run(&fixture, args(&["pod/web-1"]));
    assert_eq!(result.unwrap(), 1);
    assert_eq!(
        out,
        "Hello Pod web-1 2024-03-01 10:00:00 +0000 UTC nginx:1.25\npod/web-1\n"
    );
}

#[test]
fn test_bare_type_lists_in_store_order() {
    let fixture = fixture();
    let (result, out) = run(&fixture, args(&["pods"]));
    assert_eq!(result.unwrap(), 3);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Hello Pod a 2024-03-02 08:00:00 +0000 UTC redis:7",
            "pod/a",
            "Hello Pod b 2024-03-02 08:30:00 +0000 UTC busybox:1.36",
            "pod/b",
            "Hello Pod web-1 2024-03-01 10:00:00 +0000 UTC nginx:1.25",
            "pod/web-1",
        ]
    );
}

#[test]
fn test_missing_name_is_an_error_without_output() {
    let fixture = fixture();
    let (result, out) = run(&fixture, args(&["pod/missing"]));
    match result.unwrap_err() {
        ApiError::Resolution(ResolveError::NotFound { resource, name }) => {
            assert_eq!(resource, "pods");
            assert_eq!(name, "missing");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(out.is_empty());
}

#[test]
fn test_missing_name_does_not_stop_later_tokens() {
    let fixture = fixture();
    let (result, out) = run(&fixture, args(&["pod/missing", "deploy/api"]));
    assert!(result.is_err());
    assert_eq!(
        out,
        "Hello Deployment api 2024-01-01 00:00:00 +0000 UTC api:2 proxy:1\ndeployment/api\n"
    );
}

#[test]
fn test_type_with_several_names() {
    let fixture = fixture();
    let (result, out) = run(&fixture, args(&["po", "b", "a"]));
    assert_eq!(result.unwrap(), 2);
    assert!(out.starts_with("Hello Pod b "));
    assert!(out.contains("Hello Pod a "));
}

#[test]
fn test_namespace_scopes_lookup() {
    let fixture = fixture();
    let mut options = args(&["pod/web-1"]);
    options.namespace = Some("staging".to_string());
    let (result, out) = run(&fixture, options);
    assert_eq!(result.unwrap(), 1);
    assert!(out.contains("2024-04-01 00:00:00 +0000 UTC nginx:1.27"));
}

#[test]
fn test_all_namespaces_finds_every_match() {
    let fixture = fixture();
    let mut options = args(&["pod/web-1"]);
    options.all_namespaces = true;
    let (result, out) = run(&fixture, options);
    assert_eq!(result.unwrap(), 2);
    assert!(out.contains("nginx:1.25"));
    assert!(out.contains("nginx:1.27"));
}

#[test]
fn test_cluster_scoped_kind_ignores_namespace() {
    let fixture = fixture();
    let mut options = args(&["node/node-1"]);
    options.namespace = Some("staging".to_string());
    let (result, out) = run(&fixture, options);
    assert_eq!(result.unwrap(), 1);
    assert_eq!(out, "Hello Node node-1 2023-12-31 23:59:59 +0000 UTC\nnode/node-1\n");
}

#[test]
fn test_unknown_resource_type() {
    let fixture = fixture();
    let (result, out) = run(&fixture, args(&["gizmos/one", "pod/web-1"]));
    assert!(matches!(
        result.unwrap_err(),
        ApiError::Resolution(ResolveError::UnknownResourceType(_))
    ));
    assert!(out.contains("Hello Pod web-1"));
}

#[test]
fn test_empty_namespace_has_no_matches() {
    let fixture = fixture();
    let mut options = args(&["pods"]);
    options.namespace = Some("empty".to_string());
    let (result, out) = run(&fixture, options);
    assert!(matches!(
        result.unwrap_err(),
        ApiError::Resolution(ResolveError::NoMatches { .. })
    ));
    assert!(out.is_empty());
}

#[test]
fn test_store_namespace_comes_from_directory() {
    let dir = TempDir::new().unwrap();
    let pods = dir.path().join("namespaces").join("staging").join("pods");
    std::fs::create_dir_all(&pods).unwrap();
    std::fs::write(
        pods.join("web.yaml"),
        "kind: Pod\nmetadata:\n  name: web\n  creationTimestamp: \"2024-01-01T00:00:00Z\"\n",
    )
    .unwrap();
    let store = DirectoryStore::open(dir.path()).unwrap();

    let kinds = KindRegistry::builtin();
    let printers = PrintFlags::new("table").unwrap();
    let env = HelloEnv {
        kinds: &kinds,
        store: Some(&store),
        namespaces: &None::<String>,
        printers: &printers,
    };
    let mut options = args(&["pods"]);
    options.all_namespaces = true;
    let mut out = Vec::new();
    let summary = HelloCommandService::run(&options, &env, &mut out).unwrap();
    assert_eq!(summary.reported, 1);

    let out = String::from_utf8(out).unwrap();
    let row = out
        .lines()
        .find(|line| line.contains('┆') && line.contains("web"))
        .unwrap();
    assert!(row.contains("staging"), "namespace column lost: {row}");
}
