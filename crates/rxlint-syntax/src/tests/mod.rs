//! Unit and behaviour tests for the syntax layer.

mod behaviour;
mod lowering_tests;
