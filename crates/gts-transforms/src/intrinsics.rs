use glam::{DMat3, DVec3};

use crate::{error::TransformError, transform::checked_rows};

/// Pinhole camera intrinsic matrix.
///
/// ```text
/// | alpha_u  skew     u0 |
/// | 0        alpha_v  v0 |
/// | 0        0        1  |
/// ```
///
/// The matrix is guaranteed to be invertible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntrinsicMatrix(DMat3);

impl IntrinsicMatrix {
    /// Create an intrinsic matrix from its parameters.
    ///
    /// # Arguments
    ///
    /// * `alpha_u` - The horizontal focal length in pixels.
    /// * `alpha_v` - The vertical focal length in pixels.
    /// * `skew` - The skew between the image axes.
    /// * `u0` - The horizontal principal point in pixels.
    /// * `v0` - The vertical principal point in pixels.
    pub fn new(
        alpha_u: f64,
        alpha_v: f64,
        skew: f64,
        u0: f64,
        v0: f64,
    ) -> Result<Self, TransformError> {
        Self::from_mat3(DMat3::from_cols_array_2d(&[
            [alpha_u, 0.0, 0.0],
            [skew, alpha_v, 0.0],
            [u0, v0, 1.0],
        ]))
    }

    /// Wrap a 3x3 matrix, rejecting singular ones.
    pub fn from_mat3(mat: DMat3) -> Result<Self, TransformError> {
        let det = mat.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(TransformError::SingularIntrinsics(det));
        }
        Ok(Self(mat))
    }

    /// Build an intrinsic matrix from row-major data of arbitrary shape.
    ///
    /// # Errors
    ///
    /// [`TransformError::ShapeMismatch`] if the data is not 3x3.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, TransformError> {
        let values = checked_rows::<3>(rows)?;
        Self::from_mat3(DMat3::from_cols_array_2d(&values).transpose())
    }

    /// The identity intrinsic matrix.
    pub const IDENTITY: Self = Self(DMat3::IDENTITY);

    /// The matrix as row-major arrays.
    pub fn rows(&self) -> [[f64; 3]; 3] {
        self.0.transpose().to_cols_array_2d()
    }

    /// The underlying matrix.
    pub fn as_mat3(&self) -> &DMat3 {
        &self.0
    }

    /// The inverse matrix, mapping homogeneous pixels to normalized rays.
    pub fn inverse(&self) -> DMat3 {
        self.0.inverse()
    }

    /// Map a ray in the optical frame to homogeneous pixel coordinates.
    pub fn project(&self, ray: DVec3) -> DVec3 {
        self.0 * ray
    }

    /// Map homogeneous pixel coordinates to a ray in the optical frame.
    pub fn unproject(&self, pixel: DVec3) -> DVec3 {
        self.inverse() * pixel
    }
}
