//! Declarative structural patterns and the traversal that evaluates them.
//!
//! A check describes the nodes it cares about with a [`Selector`]. Each
//! selector is compiled once per activation into a [`CompiledPattern`],
//! which records the node kinds it can possibly match; a selector that can
//! match nothing is rejected with [`PatternError::Unsatisfiable`].
//!
//! The [`PatternEngine`] walks a tree once, iteratively and in document
//! order, and evaluates only the patterns indexed under each node's kind.

mod engine;
mod error;
mod selector;

pub use engine::{CompiledPattern, PatternEngine};
pub use error::PatternError;
pub use selector::{KindSet, Selector};
