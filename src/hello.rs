//! `hello` and `hello-world` commands: the full pipeline from raw flags to
//! reported output.

use crate::error::ApiError;
use crate::input::FilenameOptions;
use crate::namespace::{resolve_scope, NamespaceSource};
use crate::printer::PrinterFactory;
use crate::report::Reporter;
use crate::resource::{KindRegistry, ObjectStore, ResolutionRequest, Resolver, VisitSummary};
use std::io::Write;
use tracing::info;

/// Already-parsed flags and arguments for one `hello` invocation
#[derive(Debug, Clone, Default)]
pub struct HelloOptions {
    pub filenames: FilenameOptions,
    pub args: Vec<String>,
    pub namespace: Option<String>,
    pub all_namespaces: bool,
}

/// Collaborators the command runs against
pub struct HelloEnv<'a> {
    pub kinds: &'a KindRegistry,
    pub store: Option<&'a dyn ObjectStore>,
    pub namespaces: &'a dyn NamespaceSource,
    pub printers: &'a dyn PrinterFactory,
}

pub struct HelloCommandService;

impl HelloCommandService {
    /// Build the resolution request: classify input, then scope it.
    pub fn build_request(
        options: &HelloOptions,
        namespaces: &dyn NamespaceSource,
    ) -> Result<ResolutionRequest, ApiError> {
        let scope = resolve_scope(
            options.namespace.as_deref(),
            options.all_namespaces,
            namespaces,
        );
        Ok(ResolutionRequest::from_inputs(
            &options.filenames,
            &options.args,
            scope,
        )?)
    }

    /// Resolve and report every item. Output written before an error stays written.
    pub fn run(
        options: &HelloOptions,
        env: &HelloEnv<'_>,
        out: &mut dyn Write,
    ) -> Result<VisitSummary, ApiError> {
        let request = Self::build_request(options, env.namespaces)?;
        Self::execute(request, env, out)
    }

    /// Resolve and report an already built request.
    pub fn execute(
        request: ResolutionRequest,
        env: &HelloEnv<'_>,
        out: &mut dyn Write,
    ) -> Result<VisitSummary, ApiError> {
        info!(
            files = request.input.is_files(),
            namespace = %request.namespace,
            all_namespaces = request.all_namespaces,
            "Resolving resources"
        );

        let mut resolver = Resolver::new(env.kinds);
        if let Some(store) = env.store {
            resolver = resolver.with_store(store);
        }
        let resolution = resolver.resolve(request)?;

        let mut reporter = Reporter::new(env.printers, out);
        resolution.visit(|item| reporter.report(&item))
    }

    pub fn hello_world(out: &mut dyn Write) -> Result<(), ApiError> {
        writeln!(out, "Hello World").map_err(crate::error::RenderError::Write)?;
        Ok(())
    }
}
