//! Row-packed 3-D affine registration transforms.

use nalgebra::{Matrix3x4, Matrix4};
use serde::{Deserialize, Serialize};

/// A 3-D affine map stored as the 12 row-packed coefficients of its 3x4
/// matrix: `[r00 r01 r02 tx, r10 r11 r12 ty, r20 r21 r22 tz]`.
///
/// This is the registration placing a view's image into the global
/// coordinate frame. Values are immutable snapshots; composing or comparing
/// transforms never mutates the operands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowPackedAffine(pub [f64; 12]);

impl RowPackedAffine {
    /// The identity registration.
    pub fn identity() -> Self {
        Self([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0,
        ])
    }

    /// A pure translation.
    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        let mut t = Self::identity();
        t.0[3] = x;
        t.0[7] = y;
        t.0[11] = z;
        t
    }

    /// Build from a 3x4 matrix.
    pub fn from_matrix(m: &Matrix3x4<f64>) -> Self {
        let mut c = [0.0; 12];
        for row in 0..3 {
            for col in 0..4 {
                c[row * 4 + col] = m[(row, col)];
            }
        }
        Self(c)
    }

    /// The 3x4 matrix view of the coefficients.
    pub fn to_matrix(&self) -> Matrix3x4<f64> {
        Matrix3x4::from_row_slice(&self.0)
    }

    /// The translation column `[tx, ty, tz]`.
    pub fn translation(&self) -> [f64; 3] {
        [self.0[3], self.0[7], self.0[11]]
    }

    /// Compose registrations: the result applies `self` first, then `other`.
    pub fn then(&self, other: &Self) -> Self {
        let h = other.to_homogeneous() * self.to_homogeneous();
        let mut c = [0.0; 12];
        for row in 0..3 {
            for col in 0..4 {
                c[row * 4 + col] = h[(row, col)];
            }
        }
        Self(c)
    }

    /// Coefficient-wise comparison with an absolute tolerance.
    ///
    /// A pair of coefficients differing by more than `tol` fails the
    /// comparison; a difference of exactly `tol` passes.
    pub fn all_almost_equal(&self, other: &Self, tol: f64) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= tol)
    }

    fn to_homogeneous(&self) -> Matrix4<f64> {
        let mut h = Matrix4::identity();
        for row in 0..3 {
            for col in 0..4 {
                h[(row, col)] = self.0[row * 4 + col];
            }
        }
        h
    }
}

impl Default for RowPackedAffine {
    fn default() -> Self {
        Self::identity()
    }
}
