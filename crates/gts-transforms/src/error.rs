/// An error type for the transforms module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TransformError {
    /// The provided matrix does not have the expected number of rows and columns.
    #[error("Matrix should be shape {expected:?}, not {actual:?}")]
    ShapeMismatch {
        /// Expected (rows, cols).
        expected: (usize, usize),
        /// Provided (rows, cols).
        actual: (usize, usize),
    },

    /// The bottom row of a homogeneous transform is not `[0, 0, 0, 1]`.
    #[error("Bottom row of a homogeneous transform must be [0, 0, 0, 1], got {0:?}")]
    NotHomogeneous([f64; 4]),

    /// The rotation block of a homogeneous transform is not a proper rotation.
    #[error("Rotation block must be orthonormal with determinant 1, got determinant {0}")]
    NotRigid(f64),

    /// The intrinsic matrix cannot be inverted.
    #[error("Intrinsic matrix is singular (determinant {0})")]
    SingularIntrinsics(f64),

    /// The camera is mounted at zero height, so no ground depth can be recovered.
    #[error("Camera height must be non-zero to project onto the ground plane, got {0}")]
    DegenerateCameraHeight(f64),
}
