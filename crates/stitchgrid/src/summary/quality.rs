//! Aggregation over pairwise registration-quality records.

use std::collections::HashSet;

use crate::links::QualityIndex;
use crate::view::ViewId;

/// Error distribution over the pairwise links inside a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Aggregated quality values for one group.
#[derive(Debug, Clone, PartialEq)]
pub struct QualitySummary {
    /// Average correlation reported by the index for the deduplicated group.
    pub avg_correlation: f64,
    /// Number of pairwise links inside the group.
    pub link_count: usize,
    /// Error distribution, or `None` when the group has no links.
    pub error_stats: Option<ErrorStats>,
}

/// Aggregate the quality records of a group.
///
/// The group is deduplicated into a set first so a repeated view is never
/// counted against itself.
pub fn aggregate_quality(group: &[ViewId], quality: &dyn QualityIndex) -> QualitySummary {
    let set: HashSet<ViewId> = group.iter().copied().collect();
    let errors = quality.pairwise_errors(&set);
    QualitySummary {
        avg_correlation: quality.average_correlation(&set),
        link_count: quality.pairwise_link_count(&set),
        error_stats: error_stats(&errors),
    }
}

/// Mean, minimum, and maximum over error magnitudes.
///
/// Min accumulates from +infinity and max from 0 so an exact-zero error
/// still registers as the minimum.
fn error_stats(errors: &[f64]) -> Option<ErrorStats> {
    if errors.is_empty() {
        return None;
    }
    let mut min = f64::INFINITY;
    let mut max = 0.0f64;
    let mut sum = 0.0f64;
    for &e in errors {
        min = min.min(e);
        max = max.max(e);
        sum += e;
    }
    Some(ErrorStats {
        mean: sum / errors.len() as f64,
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::{LinkIndex, PairwiseLink};

    fn link(a: u32, b: u32, correlation: f64, error: f64) -> PairwiseLink {
        PairwiseLink {
            pair: (ViewId::new(0, a), ViewId::new(0, b)),
            correlation,
            error,
        }
    }

    #[test]
    fn no_links_means_no_error_stats() {
        let summary = aggregate_quality(&[ViewId::new(0, 0)], &LinkIndex::new());
        assert_eq!(summary.avg_correlation, 0.0);
        assert_eq!(summary.link_count, 0);
        assert!(summary.error_stats.is_none());
    }

    #[test]
    fn stats_cover_mean_min_and_max() {
        let index: LinkIndex = [
            link(0, 1, 0.9, 0.1),
            link(1, 2, 0.8, 0.5),
            link(0, 2, 0.7, 0.3),
        ]
        .into_iter()
        .collect();
        let group: Vec<ViewId> = (0..3).map(|s| ViewId::new(0, s)).collect();

        let summary = aggregate_quality(&group, &index);
        assert_eq!(summary.link_count, 3);
        let stats = summary.error_stats.expect("three links");
        assert!((stats.mean - 0.3).abs() < 1e-12);
        assert_eq!(stats.min, 0.1);
        assert_eq!(stats.max, 0.5);
    }

    #[test]
    fn exact_zero_error_is_a_valid_minimum() {
        let index: LinkIndex = [link(0, 1, 0.9, 0.0), link(1, 2, 0.8, 0.4)]
            .into_iter()
            .collect();
        let group: Vec<ViewId> = (0..3).map(|s| ViewId::new(0, s)).collect();

        let stats = aggregate_quality(&group, &index)
            .error_stats
            .expect("two links");
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.4);
    }

    #[test]
    fn repeated_views_in_a_group_do_not_double_count() {
        let index: LinkIndex = [link(0, 1, 0.6, 0.2)].into_iter().collect();
        let a = ViewId::new(0, 0);
        let b = ViewId::new(0, 1);

        let summary = aggregate_quality(&[a, b, a, b], &index);
        assert_eq!(summary.link_count, 1);
        assert!((summary.avg_correlation - 0.6).abs() < 1e-12);
    }
}
