//! Findings and the sinks that receive them.

use rustc_hash::FxHashMap;
use rxlint_core::Span;
use rxlint_syntax::NodeId;
use serde::Serialize;

/// One reported problem in analysed source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Identifier of the check that produced the finding.
    pub check_id: String,
    /// Key of the message in the check's metadata.
    pub message_key: String,
    /// Rendered message text.
    pub message: String,
    /// The node the finding is about.
    #[serde(skip)]
    pub node: NodeId,
    /// Span of `node`.
    pub span: Span,
    /// A narrower span to point at, such as an operator name.
    pub location: Option<Span>,
}

impl Finding {
    /// Returns the span a user should be pointed at: the location override
    /// when present, otherwise the node span.
    #[must_use]
    pub fn primary_span(&self) -> Span {
        self.location.unwrap_or(self.span)
    }
}

/// Receives findings as checks produce them.
pub trait Reporter {
    /// Records one finding.
    fn report(&mut self, finding: Finding);
}

/// Collects findings in discovery order, keeping at most `limit` per check.
#[derive(Debug, Clone, Default)]
pub struct FindingCollector {
    findings: Vec<Finding>,
    per_check: FxHashMap<String, usize>,
    limit: Option<usize>,
    dropped: usize,
}

impl FindingCollector {
    /// Creates a collector with no per-check limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collector that keeps at most `limit` findings per check.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Returns the collected findings.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Returns how many findings were discarded by the limit.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Consumes the collector, returning the findings.
    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

impl Reporter for FindingCollector {
    fn report(&mut self, finding: Finding) {
        let count = self.per_check.entry(finding.check_id.clone()).or_default();
        if self.limit.is_some_and(|limit| *count >= limit) {
            self.dropped += 1;
            return;
        }
        *count += 1;
        self.findings.push(finding);
    }
}

impl Reporter for Vec<Finding> {
    fn report(&mut self, finding: Finding) {
        self.push(finding);
    }
}
