//! Resolver and visitor: executes a [`ResolutionRequest`] as a lazy, ordered
//! sequence of items and drives a callback over it.

use crate::error::{ApiError, ResolveError};
use crate::input::InputMode;
use crate::namespace::NamespaceScope;
use crate::resource::args::{parse_selectors, Selector};
use crate::resource::item::{ObjectMeta, ResolvedItem};
use crate::resource::kinds::KindRegistry;
use crate::resource::kustomize;
use crate::resource::manifest::{
    expand_filename, flatten_into, parse_source, read_source, ManifestSource,
};
use crate::resource::request::ResolutionRequest;
use crate::resource::store::ObjectStore;
use serde_json::Value;
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Counts for one visitation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitSummary {
    /// Elements pulled from the sequence, items and errors alike
    pub visited: usize,
    /// Items the callback accepted
    pub reported: usize,
    pub failed: usize,
}

/// Executes requests against a kind registry and an optional object store.
pub struct Resolver<'a> {
    kinds: &'a KindRegistry,
    store: Option<&'a dyn ObjectStore>,
}

impl<'a> Resolver<'a> {
    pub fn new(kinds: &'a KindRegistry) -> Self {
        Self { kinds, store: None }
    }

    pub fn with_store(mut self, store: &'a dyn ObjectStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Start resolving. Only argument shape and a missing store fail here;
    /// everything else surfaces per element while iterating.
    pub fn resolve(&self, request: ResolutionRequest) -> Result<Resolution<'a>, ApiError> {
        let scope = request.scope();
        let work = match request.input {
            InputMode::Files(options) => {
                let mut pending = VecDeque::new();
                if let Some(dir) = options.kustomize {
                    pending.push_back(Pending::Kustomization(dir));
                }
                pending.extend(options.filenames.into_iter().map(Pending::Filename));
                Work::Manifests {
                    pending,
                    recursive: options.recursive,
                }
            }
            InputMode::TypeNameArgs(args) => {
                let selectors = parse_selectors(&args)?;
                let store = self.store.ok_or_else(|| {
                    ApiError::ConfigError(
                        "no object store configured; set context.store or pass --store".to_string(),
                    )
                })?;
                Work::Selectors {
                    selectors: selectors.into(),
                    store,
                }
            }
        };

        debug!(
            namespace = %scope.namespace,
            all_namespaces = scope.all_namespaces,
            continue_on_error = request.continue_on_error,
            "Resolution started"
        );

        Ok(Resolution {
            kinds: self.kinds,
            scope,
            flatten: request.flatten,
            continue_on_error: request.continue_on_error,
            work,
            ready: VecDeque::new(),
        })
    }
}

enum Pending {
    Filename(String),
    Source(ManifestSource),
    Kustomization(PathBuf),
}

enum Work<'a> {
    Manifests {
        pending: VecDeque<Pending>,
        recursive: bool,
    },
    Selectors {
        selectors: VecDeque<Selector>,
        store: &'a dyn ObjectStore,
    },
}

/// Lazy, ordered, single-use sequence of resolution results.
///
/// Each filename, directory, kustomization, or selector is only expanded and
/// read once the consumer has pulled everything before it.
pub struct Resolution<'a> {
    kinds: &'a KindRegistry,
    scope: NamespaceScope,
    flatten: bool,
    continue_on_error: bool,
    work: Work<'a>,
    ready: VecDeque<Result<ResolvedItem, ResolveError>>,
}

struct ItemContext<'c> {
    kinds: &'c KindRegistry,
    scope: &'c NamespaceScope,
    flatten: bool,
}

impl ItemContext<'_> {
    fn push_documents(
        &self,
        documents: Vec<Value>,
        origin: &str,
        ready: &mut VecDeque<Result<ResolvedItem, ResolveError>>,
    ) {
        let mut expanded = Vec::with_capacity(documents.len());
        for document in documents {
            if self.flatten {
                flatten_into(document, &mut expanded);
            } else {
                expanded.push(document);
            }
        }
        for document in expanded {
            ready.push_back(ResolvedItem::from_manifest(
                document,
                origin,
                self.kinds,
                self.scope,
            ));
        }
    }

    fn lookup(
        &self,
        store: &dyn ObjectStore,
        selector: &Selector,
        ready: &mut VecDeque<Result<ResolvedItem, ResolveError>>,
    ) {
        let Some(info) = self.kinds.lookup_resource(selector.resource()) else {
            ready.push_back(Err(ResolveError::UnknownResourceType(
                selector.resource().to_string(),
            )));
            return;
        };
        let namespace = (info.namespaced && !self.scope.all_namespaces)
            .then_some(self.scope.namespace.as_str());

        let found: Result<Vec<Value>, ResolveError> = match selector {
            Selector::Named { name, .. } => match namespace {
                Some(ns) => store.get(info, ns, name).map(|o| o.into_iter().collect()),
                None if !info.namespaced => store.get(info, "", name).map(|o| o.into_iter().collect()),
                None => store.list(info, None).map(|objects| {
                    objects
                        .into_iter()
                        .filter(|object| {
                            ObjectMeta::accessor(object, "")
                                .ok()
                                .and_then(|meta| meta.name())
                                == Some(name.as_str())
                        })
                        .collect()
                }),
            },
            Selector::All { .. } => store.list(info, namespace),
        };

        match found {
            Err(error) => ready.push_back(Err(error)),
            Ok(objects) if objects.is_empty() => {
                let error = match selector {
                    Selector::Named { name, .. } => ResolveError::NotFound {
                        resource: info.plural.clone(),
                        name: name.clone(),
                    },
                    Selector::All { .. } => ResolveError::NoMatches {
                        resource: info.plural.clone(),
                        scope: self.scope.describe(),
                    },
                };
                ready.push_back(Err(error));
            }
            Ok(objects) => {
                for object in objects {
                    ready.push_back(ResolvedItem::from_store(object, info, namespace));
                }
            }
        }
    }
}

impl Resolution<'_> {
    pub fn continue_on_error(&self) -> bool {
        self.continue_on_error
    }

    /// Expand the next unit of work into `ready`. Returns false once exhausted.
    fn advance(&mut self) -> bool {
        let Resolution {
            kinds,
            scope,
            flatten,
            work,
            ready,
            ..
        } = self;
        let ctx = ItemContext {
            kinds: *kinds,
            scope,
            flatten: *flatten,
        };

        match work {
            Work::Manifests { pending, recursive } => {
                let Some(next) = pending.pop_front() else {
                    return false;
                };
                match next {
                    Pending::Filename(filename) => match expand_filename(&filename, *recursive) {
                        Ok(sources) => {
                            for source in sources.into_iter().rev() {
                                pending.push_front(Pending::Source(source));
                            }
                        }
                        Err(error) => ready.push_back(Err(error)),
                    },
                    Pending::Source(source) => {
                        let origin = source.origin();
                        debug!(origin = %origin, "Reading manifest");
                        match read_source(&source) {
                            Ok(content) => {
                                let parsed = parse_source(&source, &content);
                                ctx.push_documents(parsed.documents, &origin, ready);
                                if let Some(error) = parsed.error {
                                    ready.push_back(Err(error));
                                }
                            }
                            Err(error) => ready.push_back(Err(error)),
                        }
                    }
                    Pending::Kustomization(dir) => match kustomize::build(&dir, ctx.kinds) {
                        Ok(documents) => {
                            ctx.push_documents(documents, &dir.display().to_string(), ready);
                        }
                        Err(error) => ready.push_back(Err(error)),
                    },
                }
                true
            }
            Work::Selectors { selectors, store } => {
                let Some(selector) = selectors.pop_front() else {
                    return false;
                };
                debug!(selector = ?selector, "Looking up objects");
                ctx.lookup(*store, &selector, ready);
                true
            }
        }
    }

    /// Visit every element in order.
    ///
    /// Error elements skip the callback. With continue-on-error every element is
    /// visited and the first error is returned at the end; otherwise the first
    /// error stops iteration.
    pub fn visit<F>(mut self, mut visitor: F) -> Result<VisitSummary, ApiError>
    where
        F: FnMut(ResolvedItem) -> Result<(), ApiError>,
    {
        let continue_on_error = self.continue_on_error;
        let mut summary = VisitSummary::default();
        let mut first_error: Option<ApiError> = None;

        while let Some(element) = self.next() {
            summary.visited += 1;
            let outcome = match element {
                Ok(item) => visitor(item),
                Err(error) => Err(ApiError::from(error)),
            };
            match outcome {
                Ok(()) => summary.reported += 1,
                Err(error) => {
                    summary.failed += 1;
                    if !continue_on_error {
                        debug!(error = %error, "Stopping visit on first error");
                        return Err(error);
                    }
                    if first_error.is_none() {
                        first_error = Some(error);
                    } else {
                        warn!(error = %error, "Additional resolution error");
                    }
                }
            }
        }

        info!(
            visited = summary.visited,
            reported = summary.reported,
            failed = summary.failed,
            "Visit finished"
        );
        match first_error {
            Some(error) => Err(error),
            None => Ok(summary),
        }
    }
}

impl Iterator for Resolution<'_> {
    type Item = Result<ResolvedItem, ResolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(element) = self.ready.pop_front() {
                return Some(element);
            }
            if !self.advance() {
                return None;
            }
        }
    }
}
