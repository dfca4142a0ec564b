//! View identity for multi-view acquisitions.

use serde::{Deserialize, Serialize};

/// Identity of one acquired image: a (timepoint, setup) pair.
///
/// Equality, hashing, and ordering are by value; the pair itself carries no
/// metadata beyond its identity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ViewId {
    /// Timepoint index of the acquisition.
    pub timepoint: u32,
    /// View-setup index (tile/channel/illumination combination).
    pub setup: u32,
}

impl ViewId {
    pub fn new(timepoint: u32, setup: u32) -> Self {
        Self { timepoint, setup }
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view (tp {}, setup {})", self.timepoint, self.setup)
    }
}
