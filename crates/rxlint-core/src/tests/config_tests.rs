//! Tests for [`AnalysisLimits`].

use crate::AnalysisLimits;

#[test]
fn default_limits_have_expected_values() {
    let limits = AnalysisLimits::default();
    assert_eq!(limits.max_resolution_depth(), 32);
    assert_eq!(limits.max_findings_per_check(), 10_000);
    assert_eq!(limits.max_descendant_search_nodes(), 100_000);
}

#[test]
fn custom_limits_construction() {
    let limits = AnalysisLimits::new(8, 50, 1000);
    assert_eq!(limits.max_resolution_depth(), 8);
    assert_eq!(limits.max_findings_per_check(), 50);
    assert_eq!(limits.max_descendant_search_nodes(), 1000);
}

#[test]
fn with_max_resolution_depth_keeps_other_limits() {
    let limits = AnalysisLimits::new(8, 50, 1000).with_max_resolution_depth(2);
    assert_eq!(limits.max_resolution_depth(), 2);
    assert_eq!(limits.max_findings_per_check(), 50);
    assert_eq!(limits.max_descendant_search_nodes(), 1000);
}
