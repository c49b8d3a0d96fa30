//! Static checks for misused rxjs observables.
//!
//! rxlint reports three kinds of mistakes in TypeScript code:
//!
//! - `no-ignored-observable`: a call statement discards an observable;
//! - `no-ignored-subscribe`: `subscribe()` is called without handlers;
//! - `no-unsafe-first`: `take` or `first` appears directly in an effect or
//!   epic pipeline built on an actions stream.
//!
//! # Architecture
//!
//! The host hands over a syntax tree and a semantic model. The
//! [`PatternEngine`](pattern::PatternEngine) walks the tree once and
//! dispatches matching nodes to check handlers, which ask the
//! [`TypeOracle`] about types and send findings to a [`Reporter`].
//! [`Linter`] ties these together for a session: it activates checks from
//! [`Settings`], builds a [`DeclarationModel`](rxlint_semantics::DeclarationModel)
//! for each file, applies inline suppressions and checks files in parallel.

pub mod checks;
mod linter;
mod oracle;
pub mod pattern;
mod reporter;
mod settings;
mod suppression;

pub use checks::{
    Check, CheckConfigError, CheckContext, CheckKind, CheckMetadata, CheckRegistry, HandlerError,
    Listener,
};
pub use linter::{
    Activation, CheckFailure, FileReport, LintError, Linter, SourceFile, SyntaxIssue,
};
pub use oracle::{OBSERVABLE_TYPE_NAMES, TypeOracle};
pub use reporter::{Finding, FindingCollector, Reporter};
pub use settings::{CheckSettings, Settings, SettingsError};
pub use suppression::{Directive, SuppressionScope, Suppressions};

#[cfg(test)]
mod tests;
