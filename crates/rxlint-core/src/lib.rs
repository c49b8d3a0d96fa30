//! Core data model shared by every stage of the rxlint pipeline.
//!
//! This crate holds the small, dependency-light types that the syntax layer,
//! the semantic model, the check host and the command-line front end all need
//! to agree on: source positions, configuration diagnostics, and the bounds
//! that keep analysis of a single file finite.
//!
//! # Core types
//!
//! - [`Span`] and [`LineCol`]: byte and line/column source positions
//! - [`DiagnosticReport`] and [`Diagnostic`]: structured configuration errors
//! - [`DiagnosticCode`]: stable `E_RXLINT_*` error codes
//! - [`AnalysisLimits`]: resolution depth and search bounds
//!
//! # Example
//!
//! ```
//! use rxlint_core::{LineCol, Span};
//!
//! let span = Span::new(0, 10, LineCol::new(0, 0), LineCol::new(0, 10));
//! assert_eq!(span.len(), 10);
//! assert_eq!(span.start.one_based(), (1, 1));
//! ```

mod config;
mod diagnostic;
mod span;

pub use config::AnalysisLimits;
pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticReport, UnknownCode};
pub use span::{LineCol, Span};

#[cfg(test)]
mod tests;
