//! Manifest sources: filename expansion, reading, multi-document parsing, and
//! list flattening.

use crate::error::ResolveError;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions picked up when expanding a directory
pub const MANIFEST_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// A single readable manifest source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    Path(PathBuf),
    Url(String),
    Stdin,
}

impl ManifestSource {
    /// Name used in messages and error origins.
    pub fn origin(&self) -> String {
        match self {
            ManifestSource::Path(path) => path.display().to_string(),
            ManifestSource::Url(url) => url.clone(),
            ManifestSource::Stdin => "STDIN".to_string(),
        }
    }

    fn is_json(&self) -> bool {
        match self {
            ManifestSource::Path(path) => path
                .extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("json")),
            ManifestSource::Url(url) => url.ends_with(".json"),
            ManifestSource::Stdin => false,
        }
    }
}

/// Expand one `-f` value into readable sources, in the order they should be visited.
pub fn expand_filename(filename: &str, recursive: bool) -> Result<Vec<ManifestSource>, ResolveError> {
    if filename == "-" {
        return Ok(vec![ManifestSource::Stdin]);
    }
    if filename.starts_with("http://") || filename.starts_with("https://") {
        return Ok(vec![ManifestSource::Url(filename.to_string())]);
    }

    let path = Path::new(filename);
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ResolveError::PathNotFound(filename.to_string()),
        _ => ResolveError::Read {
            origin: filename.to_string(),
            reason: e.to_string(),
        },
    })?;
    if !metadata.is_dir() {
        return Ok(vec![ManifestSource::Path(path.to_path_buf())]);
    }

    let walker = WalkDir::new(path)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    let mut sources = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| ResolveError::Read {
            origin: filename.to_string(),
            reason: format!("Failed to walk directory: {}", e),
        })?;
        if entry.file_type().is_file() && has_manifest_extension(entry.path()) {
            sources.push(ManifestSource::Path(entry.into_path()));
        }
    }
    Ok(sources)
}

/// True when the file extension is one of [`MANIFEST_EXTENSIONS`], ignoring case.
pub fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            MANIFEST_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Read the raw content of a source. Blocking.
pub fn read_source(source: &ManifestSource) -> Result<String, ResolveError> {
    let read_error = |reason: String| ResolveError::Read {
        origin: source.origin(),
        reason,
    };
    match source {
        ManifestSource::Path(path) => std::fs::read_to_string(path).map_err(|e| read_error(e.to_string())),
        ManifestSource::Url(url) => reqwest::blocking::get(url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|e| read_error(e.to_string())),
        ManifestSource::Stdin => {
            std::io::read_to_string(std::io::stdin()).map_err(|e| read_error(e.to_string()))
        }
    }
}

/// Documents parsed from one source, plus the error that stopped parsing, if any.
#[derive(Debug, Default)]
pub struct ParsedManifest {
    pub documents: Vec<Value>,
    pub error: Option<ResolveError>,
}

/// Parse every document of a source. Empty documents are skipped.
pub fn parse_source(source: &ManifestSource, content: &str) -> ParsedManifest {
    let origin = source.origin();
    if source.is_json() || content.trim_start().starts_with('{') {
        parse_json_stream(content, &origin)
    } else {
        parse_yaml_documents(content, &origin)
    }
}

/// Parse `---` separated YAML documents.
pub fn parse_yaml_documents(content: &str, origin: &str) -> ParsedManifest {
    let mut parsed = ParsedManifest::default();
    for document in serde_norway::Deserializer::from_str(content) {
        match Value::deserialize(document) {
            Ok(Value::Null) => continue,
            Ok(value) => parsed.documents.push(value),
            Err(e) => {
                parsed.error = Some(parse_error(origin, e.to_string()));
                break;
            }
        }
    }
    parsed
}

/// Parse one or more concatenated JSON values.
pub fn parse_json_stream(content: &str, origin: &str) -> ParsedManifest {
    let mut parsed = ParsedManifest::default();
    for value in serde_json::Deserializer::from_str(content).into_iter::<Value>() {
        match value {
            Ok(Value::Null) => continue,
            Ok(value) => parsed.documents.push(value),
            Err(e) => {
                parsed.error = Some(parse_error(origin, e.to_string()));
                break;
            }
        }
    }
    parsed
}

fn parse_error(origin: &str, reason: String) -> ResolveError {
    ResolveError::Parse {
        origin: origin.to_string(),
        reason,
    }
}

/// True for `*List` documents carrying an `items` array.
pub fn is_list(document: &Value) -> bool {
    let is_list_kind = document
        .get("kind")
        .and_then(Value::as_str)
        .map_or(false, |kind| kind.ends_with("List"));
    is_list_kind && document.get("items").map_or(false, Value::is_array)
}

/// Expand list documents into their members, recursively and in order.
pub fn flatten_into(document: Value, out: &mut Vec<Value>) {
    if !is_list(&document) {
        out.push(document);
        return;
    }
    if let Value::Object(mut map) = document {
        if let Some(Value::Array(items)) = map.remove("items") {
            for item in items {
                flatten_into(item, out);
            }
        }
    }
}
