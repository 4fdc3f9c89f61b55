//! Error types for the kubehello resolution pipeline.

use thiserror::Error;

/// Input classification errors. Raised before any resolution starts.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot provide both arguments (type/name) and file input (--filename or -f)")]
    Conflicting,

    #[error("must provide either arguments (type/name) or file input (--filename or -f)")]
    Missing,

    #[error("{0}")]
    InvalidFilenameOptions(String),

    #[error("{0}")]
    InvalidArguments(String),
}

/// Per-item resolution errors
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("the path \"{0}\" does not exist")]
    PathNotFound(String),

    #[error("error reading {origin}: {reason}")]
    Read { origin: String, reason: String },

    #[error("error parsing {origin}: {reason}")]
    Parse { origin: String, reason: String },

    #[error("unable to access metadata in {origin}: {reason}")]
    MetadataAccess { origin: String, reason: String },

    #[error("{origin}: no matches for kind \"{kind}\"")]
    UnknownKind { origin: String, kind: String },

    #[error("the server doesn't have a resource type \"{0}\"")]
    UnknownResourceType(String),

    #[error("{resource} \"{name}\" not found")]
    NotFound { resource: String, name: String },

    #[error("no {resource} found in {scope}")]
    NoMatches { resource: String, scope: String },

    #[error(
        "the namespace from the provided object \"{object}\" does not match the namespace \"{enforced}\". \
         You must pass '--namespace={object}' to perform this operation."
    )]
    NamespaceMismatch { object: String, enforced: String },

    #[error("object store error: {0}")]
    Store(String),
}

/// Rendering errors raised by printers
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(
        "unable to match a printer suitable for the output format \"{0}\", \
         allowed formats are: json,name,table,yaml"
    )]
    UnsupportedFormat(String),

    #[error("failed to serialize object: {0}")]
    Serialize(String),

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

/// Terminal error surfaced to the command layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Resolution(#[from] ResolveError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
