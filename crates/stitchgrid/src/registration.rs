//! Missing-view bookkeeping and per-view registration lookup.

use std::collections::{HashMap, HashSet};

use crate::transform::RowPackedAffine;
use crate::view::ViewId;

/// Views declared absent from the dataset (no image data acquired).
///
/// The summary engine only queries membership; ownership and mutation stay
/// with the metadata store that supplied the set.
#[derive(Debug, Clone, Default)]
pub struct MissingViews {
    views: HashSet<ViewId>,
}

impl MissingViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.views.contains(&view)
    }

    /// Declare a view missing. Returns `false` if it already was.
    pub fn insert(&mut self, view: ViewId) -> bool {
        self.views.insert(view)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl FromIterator<ViewId> for MissingViews {
    fn from_iter<I: IntoIterator<Item = ViewId>>(iter: I) -> Self {
        Self {
            views: iter.into_iter().collect(),
        }
    }
}

/// Source of the current affine registration of a view.
///
/// Implementations must return the view's current registration, not a
/// historical one. `None` means the source has no entry for the view.
pub trait TransformSource {
    fn transform(&self, view: ViewId) -> Option<RowPackedAffine>;
}

/// In-memory registration store.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistrations {
    map: HashMap<ViewId, RowPackedAffine>,
}

impl ViewRegistrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the registration of a view.
    pub fn set(&mut self, view: ViewId, transform: RowPackedAffine) {
        self.map.insert(view, transform);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl TransformSource for ViewRegistrations {
    fn transform(&self, view: ViewId) -> Option<RowPackedAffine> {
        self.map.get(&view).copied()
    }
}

impl FromIterator<(ViewId, RowPackedAffine)> for ViewRegistrations {
    fn from_iter<I: IntoIterator<Item = (ViewId, RowPackedAffine)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_lookup_hits_and_misses() {
        let v = ViewId::new(0, 3);
        let regs: ViewRegistrations =
            [(v, RowPackedAffine::from_translation(1.0, 2.0, 3.0))]
                .into_iter()
                .collect();
        assert_eq!(
            regs.transform(v).expect("registered view").translation(),
            [1.0, 2.0, 3.0]
        );
        assert!(regs.transform(ViewId::new(0, 4)).is_none());
    }

    #[test]
    fn setting_a_view_twice_replaces_the_registration() {
        let v = ViewId::new(1, 0);
        let mut regs = ViewRegistrations::new();
        regs.set(v, RowPackedAffine::identity());
        regs.set(v, RowPackedAffine::from_translation(5.0, 0.0, 0.0));
        assert_eq!(regs.len(), 1);
        assert_eq!(
            regs.transform(v).expect("registered view").translation(),
            [5.0, 0.0, 0.0]
        );
    }

    #[test]
    fn missing_views_membership() {
        let missing: MissingViews = [ViewId::new(0, 1), ViewId::new(0, 2)].into_iter().collect();
        assert_eq!(missing.len(), 2);
        assert!(missing.contains(ViewId::new(0, 1)));
        assert!(!missing.contains(ViewId::new(0, 0)));
    }
}
