//! Object stores: the backing source queried for live objects by type and name.
//!
//! Stores hand back raw documents; turning them into items (and rejecting
//! objects without usable metadata) is the resolver's job.

use crate::error::ResolveError;
use crate::resource::item::{document_kind, set_namespace, ObjectMeta};
use crate::resource::kinds::KindInfo;
use crate::resource::manifest::{has_manifest_extension, parse_source, ManifestSource};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Object store interface
pub trait ObjectStore {
    /// Fetch one object by name. Cluster-scoped kinds ignore `namespace`.
    fn get(&self, kind: &KindInfo, namespace: &str, name: &str) -> Result<Option<Value>, ResolveError>;

    /// List objects of a kind in natural enumeration order.
    /// `None` lists every namespace.
    fn list(&self, kind: &KindInfo, namespace: Option<&str>) -> Result<Vec<Value>, ResolveError>;
}

/// In-memory store with insertion-order enumeration
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Vec<Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: Value) {
        self.objects.push(object);
    }

    pub fn with_objects(objects: impl IntoIterator<Item = Value>) -> Self {
        Self {
            objects: objects.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn matching<'a>(
        &'a self,
        kind: &'a KindInfo,
        namespace: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Value> + 'a {
        self.objects.iter().filter(move |object| {
            if document_kind(object) != Some(kind.kind.as_str()) {
                return false;
            }
            match (kind.namespaced, namespace) {
                (true, Some(ns)) => object_namespace(object) == Some(ns),
                _ => true,
            }
        })
    }
}

fn object_namespace(object: &Value) -> Option<&str> {
    ObjectMeta::accessor(object, "").ok().and_then(|meta| meta.namespace())
}

fn object_name(object: &Value) -> Option<&str> {
    ObjectMeta::accessor(object, "").ok().and_then(|meta| meta.name())
}

impl ObjectStore for MemoryStore {
    fn get(&self, kind: &KindInfo, namespace: &str, name: &str) -> Result<Option<Value>, ResolveError> {
        Ok(self
            .matching(kind, Some(namespace))
            .find(|object| object_name(object) == Some(name))
            .cloned())
    }

    fn list(&self, kind: &KindInfo, namespace: Option<&str>) -> Result<Vec<Value>, ResolveError> {
        Ok(self.matching(kind, namespace).cloned().collect())
    }
}

/// Snapshot directory store.
///
/// Layout: `namespaces/<ns>/<plural>/<name>.{yaml,yml,json}` for namespaced
/// kinds and `cluster/<plural>/<name>.{yaml,yml,json}` for cluster-scoped kinds.
/// Enumeration is ordered by namespace, then file name.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ResolveError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ResolveError::Store(format!(
                "store directory {} does not exist",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, kind: &KindInfo, namespace: &str) -> PathBuf {
        if kind.namespaced {
            self.root.join("namespaces").join(namespace).join(&kind.plural)
        } else {
            self.root.join("cluster").join(&kind.plural)
        }
    }

    fn namespaces(&self) -> Result<Vec<String>, ResolveError> {
        let mut names = Vec::new();
        for entry in sorted_entries(&self.root.join("namespaces"))? {
            if entry.file_type().is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    /// Objects in one kind directory. Namespaced objects without
    /// `metadata.namespace` take the namespace of their directory.
    fn list_dir(&self, kind: &KindInfo, namespace: &str) -> Result<Vec<Value>, ResolveError> {
        let mut objects = Vec::new();
        for entry in sorted_entries(&self.kind_dir(kind, namespace))? {
            if entry.file_type().is_file() && has_manifest_extension(entry.path()) {
                objects.push(load_object(entry.path(), kind, namespace)?);
            }
        }
        Ok(objects)
    }
}

/// Direct children of `dir`, sorted by file name. A missing directory is empty.
fn sorted_entries(dir: &Path) -> Result<Vec<walkdir::DirEntry>, ResolveError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry.map_err(|e| {
                ResolveError::Store(format!("failed to read {}: {}", dir.display(), e))
            })
        })
        .collect()
}

fn load_object(path: &Path, kind: &KindInfo, namespace: &str) -> Result<Value, ResolveError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ResolveError::Store(format!("failed to read {}: {}", path.display(), e)))?;
    let source = ManifestSource::Path(path.to_path_buf());
    let parsed = parse_source(&source, &content);
    if let Some(error) = parsed.error {
        return Err(ResolveError::Store(error.to_string()));
    }
    let mut object = parsed.documents.into_iter().next().ok_or_else(|| {
        ResolveError::Store(format!("{} holds no object", path.display()))
    })?;
    if kind.namespaced && object_namespace(&object).is_none() {
        set_namespace(&mut object, namespace);
    }
    Ok(object)
}

impl ObjectStore for DirectoryStore {
    fn get(&self, kind: &KindInfo, namespace: &str, name: &str) -> Result<Option<Value>, ResolveError> {
        for entry in sorted_entries(&self.kind_dir(kind, namespace))? {
            let path = entry.path();
            let stem_matches = path.file_stem().and_then(|stem| stem.to_str()) == Some(name);
            if stem_matches && entry.file_type().is_file() && has_manifest_extension(path) {
                debug!(path = %path.display(), "Loading object from store");
                return load_object(path, kind, namespace).map(Some);
            }
        }
        Ok(None)
    }

    fn list(&self, kind: &KindInfo, namespace: Option<&str>) -> Result<Vec<Value>, ResolveError> {
        if !kind.namespaced {
            return self.list_dir(kind, "");
        }
        match namespace {
            Some(ns) => self.list_dir(kind, ns),
            None => {
                let mut objects = Vec::new();
                for ns in self.namespaces()? {
                    objects.extend(self.list_dir(kind, &ns)?);
                }
                Ok(objects)
            }
        }
    }
}
