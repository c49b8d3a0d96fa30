//! Unit tests for `rxlint_core` types.

mod config_tests;
mod diagnostic_tests;
mod span_tests;

mod behaviour;
