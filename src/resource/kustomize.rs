//! Minimal kustomization overlays: ordered `resources`, `namePrefix`,
//! `nameSuffix`, and `namespace`.

use crate::error::ResolveError;
use crate::resource::kinds::KindRegistry;
use crate::resource::manifest::{flatten_into, parse_source, read_source, ManifestSource};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Recognized kustomization file names, in lookup order
pub const KUSTOMIZATION_FILE_NAMES: &[&str] = &["kustomization.yaml", "kustomization.yml", "Kustomization"];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Kustomization {
    #[serde(default)]
    resources: Vec<String>,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    name_prefix: Option<String>,
    #[serde(default)]
    name_suffix: Option<String>,
}

/// Build the documents of a kustomization directory, flattened and in order.
pub fn build(dir: &Path, kinds: &KindRegistry) -> Result<Vec<Value>, ResolveError> {
    let mut visiting = Vec::new();
    build_inner(dir, kinds, &mut visiting)
}

fn build_inner(
    dir: &Path,
    kinds: &KindRegistry,
    visiting: &mut Vec<PathBuf>,
) -> Result<Vec<Value>, ResolveError> {
    let origin = dir.display().to_string();
    let canonical = dir.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ResolveError::PathNotFound(origin.clone()),
        _ => ResolveError::Read {
            origin: origin.clone(),
            reason: e.to_string(),
        },
    })?;
    if visiting.contains(&canonical) {
        return Err(ResolveError::Read {
            origin,
            reason: "cycle detected in kustomization resources".to_string(),
        });
    }

    let kustomization = load_kustomization(&canonical, &origin)?;
    visiting.push(canonical.clone());

    let mut documents = Vec::new();
    for resource in &kustomization.resources {
        let path = canonical.join(resource);
        if path.is_dir() {
            documents.extend(build_inner(&path, kinds, visiting)?);
            continue;
        }
        if !path.exists() {
            return Err(ResolveError::PathNotFound(path.display().to_string()));
        }
        let source = ManifestSource::Path(path);
        let content = read_source(&source)?;
        let parsed = parse_source(&source, &content);
        if let Some(error) = parsed.error {
            return Err(error);
        }
        for document in parsed.documents {
            flatten_into(document, &mut documents);
        }
    }

    visiting.pop();

    for document in &mut documents {
        apply_overlays(document, &kustomization, kinds);
    }
    Ok(documents)
}

fn load_kustomization(dir: &Path, origin: &str) -> Result<Kustomization, ResolveError> {
    let Some(path) = KUSTOMIZATION_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
    else {
        return Err(ResolveError::Read {
            origin: origin.to_string(),
            reason: format!(
                "unable to find one of {} in directory '{}'",
                KUSTOMIZATION_FILE_NAMES
                    .iter()
                    .map(|n| format!("'{}'", n))
                    .collect::<Vec<_>>()
                    .join(", "),
                dir.display()
            ),
        });
    };

    let content = std::fs::read_to_string(&path).map_err(|e| ResolveError::Read {
        origin: path.display().to_string(),
        reason: e.to_string(),
    })?;
    if content.trim().is_empty() {
        return Ok(Kustomization::default());
    }
    serde_norway::from_str(&content).map_err(|e| ResolveError::Parse {
        origin: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn apply_overlays(document: &mut Value, kustomization: &Kustomization, kinds: &KindRegistry) {
    let namespaced = document
        .get("kind")
        .and_then(Value::as_str)
        .and_then(|kind| kinds.lookup_kind(kind))
        .map_or(true, |info| info.namespaced);

    let Some(metadata) = document.get_mut("metadata").and_then(Value::as_object_mut) else {
        return;
    };

    if let Some(name) = metadata.get("name").and_then(Value::as_str) {
        let renamed = format!(
            "{}{}{}",
            kustomization.name_prefix.as_deref().unwrap_or_default(),
            name,
            kustomization.name_suffix.as_deref().unwrap_or_default()
        );
        metadata.insert("name".to_string(), Value::String(renamed));
    }

    if let (Some(namespace), true) = (&kustomization.namespace, namespaced) {
        metadata.insert("namespace".to_string(), Value::String(namespace.clone()));
    }
}
