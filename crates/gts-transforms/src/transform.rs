use std::ops::Mul;

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::error::TransformError;

/// Create a 4x4 homogeneous transform from 6-DOF pose information.
///
/// The angles are *intrinsic* Euler angles in roll-pitch-yaw order, i.e. the rotation block is
/// `Rroll * Rpitch * Ryaw`.
///
/// # Arguments
///
/// * `x` - The X component of the position, in meters.
/// * `y` - The Y component of the position, in meters.
/// * `z` - The Z component of the position, in meters.
/// * `roll` - The X axis rotation, in radians.
/// * `pitch` - The Y axis rotation, in radians.
/// * `yaw` - The Z axis rotation, in radians.
///
/// # Returns
///
/// The homogeneous transform of the pose.
///
/// Example:
///
/// ```
/// use gts_transforms::transform::{make_transform, Transform};
///
/// let pose = make_transform(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
/// assert_eq!(pose, Transform::IDENTITY);
/// ```
pub fn make_transform(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Transform {
    let rotation =
        DMat3::from_rotation_x(roll) * DMat3::from_rotation_y(pitch) * DMat3::from_rotation_z(yaw);
    Transform::from_rotation_translation(rotation, DVec3::new(x, y, z))
}

/// Rows written with 6 decimals must still be accepted as rigid.
const RIGID_TOLERANCE: f64 = 1e-5;

/// A rigid 4x4 homogeneous transform.
///
/// The top-left 3x3 block is a rotation, the top-right column a translation and the bottom row is
/// `[0, 0, 0, 1]`. Values are obtained from [`make_transform`], from composition of other
/// transforms, or from rows checked by [`Transform::from_rows`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(DMat4);

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self(DMat4::IDENTITY);

    pub(crate) const fn from_mat4_unchecked(mat: DMat4) -> Self {
        Self(mat)
    }

    /// Build a transform from a rotation block and a translation column.
    ///
    /// The rotation is expected to be orthonormal.
    pub fn from_rotation_translation(rotation: DMat3, translation: DVec3) -> Self {
        Self(DMat4::from_cols(
            rotation.x_axis.extend(0.0),
            rotation.y_axis.extend(0.0),
            rotation.z_axis.extend(0.0),
            translation.extend(1.0),
        ))
    }

    /// Build a transform from row-major data of arbitrary shape.
    ///
    /// # Arguments
    ///
    /// * `rows` - The matrix rows. Must be exactly 4 rows of 4 values.
    ///
    /// # Errors
    ///
    /// [`TransformError::ShapeMismatch`] if the data is not 4x4, and
    /// [`TransformError::NotHomogeneous`] if the bottom row is not `[0, 0, 0, 1]`, and
    /// [`TransformError::NotRigid`] if the rotation block is not orthonormal with determinant 1.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, TransformError> {
        let values = checked_rows::<4>(rows)?;
        if values[3] != [0.0, 0.0, 0.0, 1.0] {
            return Err(TransformError::NotHomogeneous(values[3]));
        }

        let transform = Self(DMat4::from_cols_array_2d(&values).transpose());
        let rotation = transform.rotation();
        let determinant = rotation.determinant();
        let orthonormal =
            (rotation.transpose() * rotation).abs_diff_eq(DMat3::IDENTITY, RIGID_TOLERANCE);
        if !orthonormal || (determinant - 1.0).abs() > RIGID_TOLERANCE {
            return Err(TransformError::NotRigid(determinant));
        }
        Ok(transform)
    }

    /// The matrix as row-major arrays.
    pub fn rows(&self) -> [[f64; 4]; 4] {
        self.0.transpose().to_cols_array_2d()
    }

    /// The underlying matrix.
    pub fn as_mat4(&self) -> &DMat4 {
        &self.0
    }

    /// The 3x3 rotation block.
    pub fn rotation(&self) -> DMat3 {
        DMat3::from_mat4(self.0)
    }

    /// The translation column.
    pub fn translation(&self) -> DVec3 {
        self.0.w_axis.truncate()
    }

    /// The inverse transform, computed in closed form as `[R^T | -R^T t]`.
    pub fn inverse(&self) -> Self {
        let rotation_inv = self.rotation().transpose();
        let translation_inv = -(rotation_inv * self.translation());
        Self::from_rotation_translation(rotation_inv, translation_inv)
    }

    /// Transform a 3D point.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.0.transform_point3(point)
    }

    /// Transform a homogeneous 4-vector.
    pub fn transform_vec4(&self, point: DVec4) -> DVec4 {
        self.0 * point
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Self::Output {
        Transform(self.0 * rhs.0)
    }
}

/// Copy rows of arbitrary shape into an `N`x`N` array, checking the shape.
pub(crate) fn checked_rows<const N: usize>(
    rows: &[impl AsRef<[f64]>],
) -> Result<[[f64; N]; N], TransformError> {
    let cols = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
    let mismatch = rows.iter().find(|row| row.as_ref().len() != N);
    if rows.len() != N || mismatch.is_some() {
        let actual_cols = mismatch.map(|row| row.as_ref().len()).unwrap_or(cols);
        return Err(TransformError::ShapeMismatch {
            expected: (N, N),
            actual: (rows.len(), actual_cols),
        });
    }

    let mut values = [[0.0; N]; N];
    for (dst, src) in values.iter_mut().zip(rows) {
        dst.copy_from_slice(src.as_ref());
    }
    Ok(values)
}
