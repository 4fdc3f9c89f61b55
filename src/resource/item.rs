//! Resolved items and metadata access over schema-less documents.

use crate::error::ResolveError;
use crate::namespace::NamespaceScope;
use crate::resource::kinds::{KindInfo, KindRegistry};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

/// Where an item came from. Selects the report message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSource {
    /// A document read from a manifest (file, directory entry, URL, stdin, kustomization)
    Manifest { origin: String },
    /// A live object returned by the object store
    Store,
}

/// One resolved object
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    pub kind: String,
    pub name: String,
    /// Empty for cluster-scoped kinds
    pub namespace: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub object: Value,
    pub source: ItemSource,
}

/// Read-only view over `metadata` of a document
pub struct ObjectMeta<'a> {
    metadata: &'a Map<String, Value>,
}

impl<'a> ObjectMeta<'a> {
    pub fn accessor(object: &'a Value, origin: &str) -> Result<Self, ResolveError> {
        let metadata = object
            .as_object()
            .ok_or_else(|| metadata_error(origin, "object is not a map"))?
            .get("metadata")
            .and_then(Value::as_object)
            .ok_or_else(|| metadata_error(origin, "object has no metadata"))?;
        Ok(Self { metadata })
    }

    pub fn name(&self) -> Option<&'a str> {
        self.string_field("name")
    }

    pub fn namespace(&self) -> Option<&'a str> {
        self.string_field("namespace")
    }

    /// `creationTimestamp` as RFC 3339. `Ok(None)` when absent.
    pub fn creation_timestamp(&self, origin: &str) -> Result<Option<DateTime<Utc>>, ResolveError> {
        match self.string_field("creationTimestamp") {
            None => Ok(None),
            Some(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|t| Some(t.with_timezone(&Utc)))
                .map_err(|e| {
                    metadata_error(origin, &format!("invalid creationTimestamp {:?}: {}", raw, e))
                }),
        }
    }

    fn string_field(&self, key: &str) -> Option<&'a str> {
        self.metadata
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

fn metadata_error(origin: &str, reason: &str) -> ResolveError {
    ResolveError::MetadataAccess {
        origin: origin.to_string(),
        reason: reason.to_string(),
    }
}

/// `kind` field of a document, if any.
pub fn document_kind(object: &Value) -> Option<&str> {
    object.get("kind").and_then(Value::as_str).filter(|s| !s.is_empty())
}

impl ResolvedItem {
    /// Build an item from a manifest document, applying namespace defaulting
    /// and enforcement.
    pub fn from_manifest(
        mut object: Value,
        origin: &str,
        kinds: &KindRegistry,
        scope: &NamespaceScope,
    ) -> Result<Self, ResolveError> {
        let kind = document_kind(&object)
            .ok_or_else(|| metadata_error(origin, "object has no kind"))?
            .to_string();
        let info = kinds.lookup_kind(&kind).ok_or_else(|| ResolveError::UnknownKind {
            origin: origin.to_string(),
            kind: kind.clone(),
        })?;

        let meta = ObjectMeta::accessor(&object, origin)?;
        let name = meta
            .name()
            .ok_or_else(|| metadata_error(origin, "object has no metadata.name"))?
            .to_string();
        // The manifest greeting never shows the timestamp, so a bad value is dropped.
        let creation_time = meta.creation_timestamp(origin).unwrap_or_else(|error| {
            debug!(%error, "Ignoring unparsable creationTimestamp");
            None
        });
        let object_namespace = meta.namespace().map(str::to_string);

        let namespace = if info.namespaced {
            match object_namespace {
                Some(ns) if scope.enforce_namespace && ns != scope.namespace => {
                    return Err(ResolveError::NamespaceMismatch {
                        object: ns,
                        enforced: scope.namespace.clone(),
                    });
                }
                Some(ns) => ns,
                None => {
                    set_namespace(&mut object, &scope.namespace);
                    scope.namespace.clone()
                }
            }
        } else {
            String::new()
        };

        Ok(Self {
            kind: info.kind.clone(),
            name,
            namespace,
            creation_time,
            object,
            source: ItemSource::Manifest {
                origin: origin.to_string(),
            },
        })
    }

    /// Build an item from a live store object of a known kind.
    pub fn from_store(
        object: Value,
        info: &KindInfo,
        lookup_namespace: Option<&str>,
    ) -> Result<Self, ResolveError> {
        let origin = format!("{} from the object store", info.plural);
        let meta = ObjectMeta::accessor(&object, &origin)?;
        let name = meta
            .name()
            .ok_or_else(|| metadata_error(&origin, "object has no metadata.name"))?
            .to_string();
        let creation_time = meta.creation_timestamp(&origin)?;
        let namespace = if info.namespaced {
            meta.namespace()
                .or(lookup_namespace)
                .unwrap_or_default()
                .to_string()
        } else {
            String::new()
        };

        Ok(Self {
            kind: info.kind.clone(),
            name,
            namespace,
            creation_time,
            object,
            source: ItemSource::Store,
        })
    }

    pub fn is_from_manifest(&self) -> bool {
        matches!(self.source, ItemSource::Manifest { .. })
    }
}

/// Write `metadata.namespace`. Objects without a metadata map are left alone.
pub(crate) fn set_namespace(object: &mut Value, namespace: &str) {
    if let Some(metadata) = object.get_mut("metadata").and_then(Value::as_object_mut) {
        metadata.insert("namespace".to_string(), Value::String(namespace.to_string()));
    }
}
