//! Query builder integration tests
//!
//! Tests for the simple cts builder, the query-by-example builder, and the full expression
//! builder with its resolver and range index configuration.

mod config_tests;
mod example_tests;
mod helpers;
mod simple_tests;
