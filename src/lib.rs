//! kubehello: Kubernetes-style resource greeting
//!
//! Classifies invocation input as manifest files or type/name arguments, scopes
//! it to a namespace, resolves it into a lazy sequence of items, and reports a
//! greeting plus a rendering for each item.

pub mod cli;
pub mod config;
pub mod error;
pub mod hello;
pub mod input;
pub mod logging;
pub mod namespace;
pub mod printer;
pub mod report;
pub mod resource;
