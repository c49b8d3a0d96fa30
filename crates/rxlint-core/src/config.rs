//! Analysis limits that keep per-file work bounded.

use serde::{Deserialize, Serialize};

/// Bounds applied while analysing a single file.
///
/// # Defaults
///
/// - `max_resolution_depth` (32): alias, union, supertype and inference
///   steps followed before a type is treated as unresolvable
/// - `max_findings_per_check` (10 000): findings kept per check per file
/// - `max_descendant_search_nodes` (100 000): nodes visited by one
///   existential descendant pattern before it gives up
///
/// # Example
///
/// ```
/// use rxlint_core::AnalysisLimits;
///
/// let limits = AnalysisLimits::default();
/// assert_eq!(limits.max_resolution_depth(), 32);
///
/// let shallow = limits.with_max_resolution_depth(4);
/// assert_eq!(shallow.max_resolution_depth(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisLimits {
    /// Maximum resolution steps through aliases, unions and supertypes.
    max_resolution_depth: usize,
    /// Maximum findings emitted per check for one file before truncation.
    max_findings_per_check: usize,
    /// Maximum nodes visited while evaluating one descendant search.
    max_descendant_search_nodes: usize,
}

impl AnalysisLimits {
    /// Creates limits with explicit values.
    #[must_use]
    pub const fn new(
        max_resolution_depth: usize,
        max_findings_per_check: usize,
        max_descendant_search_nodes: usize,
    ) -> Self {
        Self {
            max_resolution_depth,
            max_findings_per_check,
            max_descendant_search_nodes,
        }
    }

    /// Returns a copy with a different resolution depth.
    #[must_use]
    pub const fn with_max_resolution_depth(self, max_resolution_depth: usize) -> Self {
        Self {
            max_resolution_depth,
            ..self
        }
    }

    /// Returns the maximum resolution depth.
    #[must_use]
    pub const fn max_resolution_depth(&self) -> usize {
        self.max_resolution_depth
    }

    /// Returns the maximum findings kept per check per file.
    #[must_use]
    pub const fn max_findings_per_check(&self) -> usize {
        self.max_findings_per_check
    }

    /// Returns the maximum nodes visited by a descendant search.
    #[must_use]
    pub const fn max_descendant_search_nodes(&self) -> usize {
        self.max_descendant_search_nodes
    }
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_resolution_depth: 32,
            max_findings_per_check: 10_000,
            max_descendant_search_nodes: 100_000,
        }
    }
}
