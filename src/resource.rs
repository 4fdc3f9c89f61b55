//! Resource resolution: request building, manifest and store lookup, and the
//! lazy visitor that feeds the reporter.

pub mod args;
pub mod item;
pub mod kinds;
pub mod kustomize;
pub mod manifest;
pub mod request;
pub mod store;
pub mod visitor;

pub use item::{ItemSource, ResolvedItem};
pub use kinds::{KindInfo, KindRegistry};
pub use request::{RequestBuilder, ResolutionRequest};
pub use store::{DirectoryStore, MemoryStore, ObjectStore};
pub use visitor::{Resolution, Resolver, VisitSummary};
