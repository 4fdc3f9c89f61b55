//! CLI output: error mapping from domain errors to the stderr line.

use crate::error::ApiError;

/// Map a terminal error to the single line printed on stderr.
pub fn map_error(e: &ApiError) -> String {
    format!("error: {}", e)
}
