//! Integration tests for kubehello

mod cli_process;
mod config_integration;
mod store_lookup;
pub mod test_utils;
