//! Spatial-location consistency across the views of a group.

use crate::registration::{MissingViews, TransformSource};
use crate::transform::RowPackedAffine;
use crate::view::ViewId;

use super::SummaryError;

/// Absolute per-coefficient tolerance for comparing registrations.
///
/// Floating round-trips through transform composition introduce noise at
/// this scale. The tolerance is absolute, not relative: registration
/// coefficient distances are physically meaningful.
pub const COEFF_TOLERANCE: f64 = 1e-5;

/// Where a group of views sits in the global coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationResult {
    /// Every view of the group is missing.
    AllMissing { total: usize },
    /// Present views disagree about their registration.
    Inconsistent { present: usize, total: usize },
    /// All present views share one registration; carries its translation.
    Consistent { translation: [f64; 3] },
}

/// Determine whether a group occupies a single consistent location.
///
/// The reference registration is the first present view in group order, a
/// deliberate tie-break kept stable because changing it changes displayed
/// output on borderline-consistent groups. Every other present view is
/// compared to the reference coefficient-wise under [`COEFF_TOLERANCE`].
///
/// A view that is neither missing nor registered violates the caller
/// contract and surfaces as [`SummaryError::MissingTransform`].
pub fn resolve_location(
    group: &[ViewId],
    missing: &MissingViews,
    transforms: &dyn TransformSource,
) -> Result<LocationResult, SummaryError> {
    if group.is_empty() {
        return Err(SummaryError::EmptyGroup);
    }

    let total = group.len();
    let mut present = 0usize;
    let mut reference: Option<RowPackedAffine> = None;
    let mut consistent = true;

    for &view in group {
        if missing.contains(view) {
            continue;
        }
        present += 1;

        let transform = transforms
            .transform(view)
            .ok_or(SummaryError::MissingTransform { view })?;
        let reference = *reference.get_or_insert(transform);
        consistent &= reference.all_almost_equal(&transform, COEFF_TOLERANCE);
    }

    Ok(match reference {
        None => LocationResult::AllMissing { total },
        Some(_) if !consistent => LocationResult::Inconsistent { present, total },
        Some(reference) => LocationResult::Consistent {
            translation: reference.translation(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::ViewRegistrations;

    fn views(n: u32) -> Vec<ViewId> {
        (0..n).map(|s| ViewId::new(0, s)).collect()
    }

    fn registered(group: &[ViewId], transform: RowPackedAffine) -> ViewRegistrations {
        group.iter().map(|&v| (v, transform)).collect()
    }

    #[test]
    fn empty_group_is_rejected() {
        let result = resolve_location(&[], &MissingViews::new(), &ViewRegistrations::new());
        assert_eq!(result, Err(SummaryError::EmptyGroup));
    }

    #[test]
    fn all_views_missing_reports_the_group_size() {
        let group = views(3);
        let missing: MissingViews = group.iter().copied().collect();
        let result = resolve_location(&group, &missing, &ViewRegistrations::new());
        assert_eq!(result, Ok(LocationResult::AllMissing { total: 3 }));
    }

    #[test]
    fn identical_transforms_resolve_to_the_reference_translation() {
        let group = views(3);
        let regs = registered(&group, RowPackedAffine::from_translation(10.0, 20.5, 0.0));
        let result = resolve_location(&group, &MissingViews::new(), &regs);
        assert_eq!(
            result,
            Ok(LocationResult::Consistent {
                translation: [10.0, 20.5, 0.0]
            })
        );
    }

    #[test]
    fn missing_views_are_skipped_when_counting_present() {
        let group = views(3);
        let missing: MissingViews = [group[1]].into_iter().collect();
        let mut regs = registered(&group, RowPackedAffine::from_translation(1.0, 2.0, 3.0));
        // The missing view may carry any stale registration; it is ignored.
        regs.set(group[1], RowPackedAffine::from_translation(99.0, 99.0, 99.0));
        let result = resolve_location(&group, &missing, &regs);
        assert_eq!(
            result,
            Ok(LocationResult::Consistent {
                translation: [1.0, 2.0, 3.0]
            })
        );
    }

    #[test]
    fn deviation_beyond_tolerance_reports_present_and_total() {
        let group = views(2);
        let mut regs = registered(&group, RowPackedAffine::identity());
        let mut off = RowPackedAffine::identity();
        off.0[5] += 0.01;
        regs.set(group[1], off);
        let result = resolve_location(&group, &MissingViews::new(), &regs);
        assert_eq!(
            result,
            Ok(LocationResult::Inconsistent {
                present: 2,
                total: 2
            })
        );
    }

    #[test]
    fn deviation_within_tolerance_stays_consistent() {
        let group = views(2);
        let mut regs = registered(&group, RowPackedAffine::from_translation(5.0, 0.0, 0.0));
        let mut nudged = RowPackedAffine::from_translation(5.0, 0.0, 0.0);
        nudged.0[0] += 1e-6;
        regs.set(group[1], nudged);
        let result = resolve_location(&group, &MissingViews::new(), &regs);
        assert_eq!(
            result,
            Ok(LocationResult::Consistent {
                translation: [5.0, 0.0, 0.0]
            })
        );
    }

    #[test]
    fn reference_is_the_first_present_view_in_group_order() {
        let group = views(3);
        let missing: MissingViews = [group[0]].into_iter().collect();
        let mut regs = ViewRegistrations::new();
        regs.set(group[1], RowPackedAffine::from_translation(7.0, 8.0, 9.0));
        regs.set(group[2], RowPackedAffine::from_translation(7.0, 8.0, 9.0));
        let result = resolve_location(&group, &missing, &regs);
        assert_eq!(
            result,
            Ok(LocationResult::Consistent {
                translation: [7.0, 8.0, 9.0]
            })
        );
    }

    #[test]
    fn unregistered_present_view_is_a_contract_violation() {
        let group = views(2);
        let mut regs = ViewRegistrations::new();
        regs.set(group[0], RowPackedAffine::identity());
        let result = resolve_location(&group, &MissingViews::new(), &regs);
        assert_eq!(
            result,
            Err(SummaryError::MissingTransform { view: group[1] })
        );
    }
}
