//! Property-based tests for resolution ordering and accumulation
