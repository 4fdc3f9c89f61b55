//! Namespace scoping: effective namespace, enforcement, and all-namespaces.

/// Namespace used when neither the caller nor the current context names one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Source of the current-context namespace (usually the loaded configuration).
pub trait NamespaceSource {
    fn current_namespace(&self) -> Option<String>;
}

/// Fixed namespace source, handy for embedding and tests.
impl NamespaceSource for Option<String> {
    fn current_namespace(&self) -> Option<String> {
        self.clone()
    }
}

/// Effective namespace scope for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceScope {
    pub namespace: String,
    /// The namespace was given explicitly; manifest objects in another namespace are rejected.
    pub enforce_namespace: bool,
    pub all_namespaces: bool,
}

impl NamespaceScope {
    /// Human-readable scope for messages ("namespace default", "all namespaces").
    pub fn describe(&self) -> String {
        if self.all_namespaces {
            "all namespaces".to_string()
        } else {
            format!("namespace {}", self.namespace)
        }
    }
}

impl Default for NamespaceScope {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            enforce_namespace: false,
            all_namespaces: false,
        }
    }
}

/// Resolve the effective scope from caller flags and the current context.
pub fn resolve_scope(
    explicit: Option<&str>,
    all_namespaces: bool,
    source: &dyn NamespaceSource,
) -> NamespaceScope {
    let explicit = explicit.map(str::trim).filter(|ns| !ns.is_empty());
    let context_namespace = || {
        source
            .current_namespace()
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
    };

    if all_namespaces {
        return NamespaceScope {
            namespace: explicit.map(str::to_string).unwrap_or_else(context_namespace),
            enforce_namespace: false,
            all_namespaces: true,
        };
    }

    match explicit {
        Some(ns) => NamespaceScope {
            namespace: ns.to_string(),
            enforce_namespace: true,
            all_namespaces: false,
        },
        None => NamespaceScope {
            namespace: context_namespace(),
            enforce_namespace: false,
            all_namespaces: false,
        },
    }
}
