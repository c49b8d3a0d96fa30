//! Session-level entry point: activate checks once, then check files.

use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use rxlint_core::{AnalysisLimits, DiagnosticCode, DiagnosticReport, Span};
use rxlint_semantics::{DeclarationModel, Prelude, SemanticModel};
use rxlint_syntax::{Parser, SupportedLanguage, SyntaxError, SyntaxErrorInfo, SyntaxTree};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::checks::{CheckContext, CheckMetadata, CheckRegistry, Handler};
use crate::oracle::TypeOracle;
use crate::pattern::PatternEngine;
use crate::reporter::{Finding, FindingCollector};
use crate::settings::Settings;
use crate::suppression::Suppressions;

const LINTER_TARGET: &str = "rxlint::linter";

/// One source file to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Identifier echoed in the report, usually a path.
    pub uri: String,
    /// Grammar to parse with.
    pub language: SupportedLanguage,
    /// Source text.
    pub source: String,
}

impl SourceFile {
    /// Creates a source file.
    #[must_use]
    pub fn new(uri: impl Into<String>, language: SupportedLanguage, source: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            language,
            source: source.into(),
        }
    }
}

/// A check that stopped early on a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckFailure {
    /// The check that failed.
    pub check_id: String,
    /// What went wrong.
    pub message: String,
    /// The node being handled when the check failed.
    pub span: Option<Span>,
}

/// A region the parser could not make sense of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxIssue {
    /// One-based line.
    pub line: u32,
    /// One-based column.
    pub column: u32,
    /// Parser message.
    pub message: String,
}

impl From<SyntaxErrorInfo> for SyntaxIssue {
    fn from(info: SyntaxErrorInfo) -> Self {
        Self {
            line: info.line,
            column: info.column,
            message: info.message,
        }
    }
}

/// Everything found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// The file's identifier.
    pub uri: String,
    /// Findings in discovery order, suppressed ones removed.
    pub findings: Vec<Finding>,
    /// Checks that stopped early.
    pub failures: Vec<CheckFailure>,
    /// Parse errors. Checks still run on the recovered tree.
    pub syntax_errors: Vec<SyntaxIssue>,
    /// Number of findings removed by inline directives.
    pub suppressed: usize,
}

impl FileReport {
    /// Returns `true` if the file has findings.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// A file could not be checked at all.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LintError {
    /// The file could not be parsed.
    #[error("failed to parse {uri}: {source}")]
    Syntax {
        /// The file's identifier.
        uri: String,
        /// The parser failure.
        #[source]
        source: SyntaxError,
    },
}

impl LintError {
    /// Returns the identifier of the file that failed.
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Syntax { uri, .. } => uri,
        }
    }
}

struct ActiveHandler {
    check: usize,
    handler: Box<dyn Handler>,
}

/// The result of [`Linter::activate`].
#[derive(Debug)]
pub struct Activation {
    /// The linter with every check that activated cleanly.
    pub linter: Linter,
    /// Configuration problems; each named check is disabled.
    pub errors: DiagnosticReport,
}

/// Runs activated checks over files.
///
/// A linter is immutable once activated and can check many files
/// concurrently.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use rxlint::{CheckRegistry, Linter, Settings};
/// use rxlint_core::AnalysisLimits;
/// use rxlint_semantics::Prelude;
/// use rxlint_syntax::SupportedLanguage;
///
/// let activation = Linter::activate(
///     &CheckRegistry::builtin(),
///     &Settings::default(),
///     AnalysisLimits::default(),
///     Arc::new(Prelude::rxjs()?),
/// );
/// assert!(activation.errors.is_empty());
///
/// let report = activation.linter.check_source(
///     "effect.ts",
///     SupportedLanguage::TypeScript,
///     "declare const source$: Observable<number>;\nsource$.subscribe();\n",
/// )?;
/// let ids: Vec<_> = report.findings.iter().map(|f| f.check_id.as_str()).collect();
/// assert_eq!(ids, ["no-ignored-subscribe"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Linter {
    engine: PatternEngine<ActiveHandler>,
    checks: Vec<&'static CheckMetadata>,
    prelude: Arc<Prelude>,
    limits: AnalysisLimits,
}

impl Linter {
    /// Configures every enabled check in `registry` according to
    /// `settings`.
    ///
    /// Checks whose configuration is rejected are left out and reported in
    /// [`Activation::errors`]; the remaining checks still run. Settings for
    /// unknown check identifiers are reported as well.
    #[must_use]
    pub fn activate(
        registry: &CheckRegistry,
        settings: &Settings,
        limits: AnalysisLimits,
        prelude: Arc<Prelude>,
    ) -> Activation {
        let mut errors = DiagnosticReport::default();
        for id in settings.checks.keys() {
            if registry.get(id).is_none() {
                warn!(target: LINTER_TARGET, check = %id, "settings name an unknown check");
                errors.extend(DiagnosticReport::single(
                    DiagnosticCode::UnknownCheck,
                    format!("no check named `{id}`"),
                    Some(id.as_str()),
                ));
            }
        }

        let mut engine = PatternEngine::new(limits.max_descendant_search_nodes());
        let mut checks = Vec::new();
        for check in registry.iter() {
            let metadata = check.metadata();
            let configured = settings.check(metadata.id).cloned().unwrap_or_default();
            if !configured.enabled {
                debug!(target: LINTER_TARGET, check = metadata.id, "check disabled by settings");
                continue;
            }
            let listeners = match check.configure(&configured.options) {
                Ok(listeners) => listeners,
                Err(error) => {
                    warn!(target: LINTER_TARGET, check = metadata.id, %error, "check disabled");
                    errors.extend(error.into());
                    continue;
                }
            };
            let index = checks.len();
            checks.push(metadata);
            for listener in listeners {
                let (pattern, handler) = listener.into_parts();
                engine.register(pattern, ActiveHandler {
                    check: index,
                    handler,
                });
            }
        }

        debug!(
            target: LINTER_TARGET,
            checks = checks.len(),
            patterns = engine.len(),
            errors = errors.len(),
            "activated checks"
        );
        Activation {
            linter: Self {
                engine,
                checks,
                prelude,
                limits,
            },
            errors,
        }
    }

    /// Iterates over the identifiers of the active checks.
    pub fn check_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|metadata| metadata.id)
    }

    /// Returns the analysis limits in force.
    #[must_use]
    pub const fn limits(&self) -> AnalysisLimits {
        self.limits
    }

    /// Parses `source`, infers a [`DeclarationModel`] for it and runs every
    /// active check.
    ///
    /// # Errors
    ///
    /// Returns [`LintError::Syntax`] if the parser cannot be created or
    /// gives up on the source. Recoverable syntax errors are recorded in
    /// the report instead.
    pub fn check_source(
        &self,
        uri: &str,
        language: SupportedLanguage,
        source: &str,
    ) -> Result<FileReport, LintError> {
        let wrap = |error: SyntaxError| LintError::Syntax {
            uri: uri.to_owned(),
            source: error,
        };
        let parsed = Parser::new(language)
            .and_then(|mut parser| parser.parse(source))
            .map_err(wrap)?;
        let syntax_errors: Vec<SyntaxIssue> =
            parsed.errors().into_iter().map(SyntaxIssue::from).collect();
        let tree = parsed.lower();
        let model = DeclarationModel::build(&tree, &self.prelude, &self.limits);

        let mut report = self.check_tree(uri, &tree, &model);
        report.syntax_errors = syntax_errors;
        Ok(report)
    }

    /// Runs every active check over a tree with a host-supplied model.
    #[must_use]
    pub fn check_tree(&self, uri: &str, tree: &SyntaxTree, model: &dyn SemanticModel) -> FileReport {
        let oracle = TypeOracle::new(model, self.limits.max_resolution_depth());
        let mut collector = FindingCollector::with_limit(self.limits.max_findings_per_check());
        let mut failed: FxHashSet<usize> = FxHashSet::default();
        let mut failures = Vec::new();

        self.engine.traverse(tree, |node, active| {
            if failed.contains(&active.check) {
                return;
            }
            let Some(metadata) = self.checks.get(active.check).copied() else {
                return;
            };
            let mut cx = CheckContext::new(tree, &oracle, metadata, &mut collector);
            if let Err(error) = active.handler.handle(node, &mut cx) {
                warn!(
                    target: LINTER_TARGET,
                    check = metadata.id,
                    uri,
                    %error,
                    "check failed; skipping it for the rest of the file"
                );
                failed.insert(active.check);
                failures.push(CheckFailure {
                    check_id: metadata.id.to_owned(),
                    message: error.to_string(),
                    span: tree.span(node),
                });
            }
        });

        let dropped = collector.dropped();
        let suppressions = Suppressions::from_tree(tree);
        let (suppressed, findings): (Vec<Finding>, Vec<Finding>) = collector
            .into_findings()
            .into_iter()
            .partition(|finding| suppressions.suppresses_finding(finding));

        debug!(
            target: LINTER_TARGET,
            uri,
            findings = findings.len(),
            suppressed = suppressed.len(),
            dropped,
            failures = failures.len(),
            "checked file"
        );
        FileReport {
            uri: uri.to_owned(),
            findings,
            failures,
            syntax_errors: Vec::new(),
            suppressed: suppressed.len(),
        }
    }

    /// Checks `files` in parallel. Reports are returned in input order.
    #[must_use]
    pub fn check_sources(&self, files: &[SourceFile]) -> Vec<Result<FileReport, LintError>> {
        files
            .par_iter()
            .map(|file| self.check_source(&file.uri, file.language, &file.source))
            .collect()
    }
}

impl std::fmt::Debug for Linter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linter")
            .field(
                "checks",
                &self.checks.iter().map(|metadata| metadata.id).collect::<Vec<_>>(),
            )
            .field("patterns", &self.engine.len())
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}
