//! Resolution requests: declarative, not-yet-executed descriptions of what to resolve.

use crate::error::InputError;
use crate::input::{classify, FilenameOptions, InputMode};
use crate::namespace::NamespaceScope;

/// Immutable once built; consumed by [`crate::resource::Resolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub input: InputMode,
    pub namespace: String,
    pub enforce_namespace: bool,
    pub all_namespaces: bool,
    /// Keep visiting after a per-item error; the first error is still returned.
    pub continue_on_error: bool,
    /// Expand `*List` documents into their members.
    pub flatten: bool,
}

impl ResolutionRequest {
    /// Classify the raw inputs and build a request with the default policy.
    pub fn from_inputs(
        files: &FilenameOptions,
        args: &[String],
        scope: NamespaceScope,
    ) -> Result<Self, InputError> {
        let input = classify(files, args)?;
        Ok(RequestBuilder::new(input, scope).build())
    }

    pub fn scope(&self) -> NamespaceScope {
        NamespaceScope {
            namespace: self.namespace.clone(),
            enforce_namespace: self.enforce_namespace,
            all_namespaces: self.all_namespaces,
        }
    }
}

/// Builder for [`ResolutionRequest`]. Flattening and continue-on-error default to on.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    input: InputMode,
    scope: NamespaceScope,
    continue_on_error: bool,
    flatten: bool,
}

impl RequestBuilder {
    pub fn new(input: InputMode, scope: NamespaceScope) -> Self {
        Self {
            input,
            scope,
            continue_on_error: true,
            flatten: true,
        }
    }

    pub fn continue_on_error(mut self, enabled: bool) -> Self {
        self.continue_on_error = enabled;
        self
    }

    pub fn flatten(mut self, enabled: bool) -> Self {
        self.flatten = enabled;
        self
    }

    pub fn build(self) -> ResolutionRequest {
        ResolutionRequest {
            input: self.input,
            namespace: self.scope.namespace,
            enforce_namespace: self.scope.enforce_namespace,
            all_namespaces: self.scope.all_namespaces,
            continue_on_error: self.continue_on_error,
            flatten: self.flatten,
        }
    }
}
