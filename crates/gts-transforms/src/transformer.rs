use glam::{DMat4, DVec2, DVec3, DVec4};

use crate::{
    error::TransformError, intrinsics::IntrinsicMatrix, pose::PlanarPose, transform::Transform,
};

/// Rotation from image axes (right, down, forward) to camera axes (forward, left, up).
///
/// This is a calibration constant of the renderer's optical frame convention.
pub const IMAGE_TO_CAMERA: Transform = Transform::from_mat4_unchecked(DMat4::from_cols(
    DVec4::new(0.0, -1.0, 0.0, 0.0),
    DVec4::new(0.0, 0.0, -1.0, 0.0),
    DVec4::new(1.0, 0.0, 0.0, 0.0),
    DVec4::new(0.0, 0.0, 0.0, 1.0),
));

/// Converts poses and points between the robot, camera, image and pixel frames.
///
/// The camera pose is measured from the robot's frame of reference and the intrinsic matrix is
/// the one used by the renderer. Both are fixed for a run; use [`Transformer::with_camera_pose`]
/// or [`Transformer::with_intrinsics`] to obtain a transformer with a replaced value.
#[derive(Debug, Clone)]
pub struct Transformer {
    camera_pose: Transform,
    camera_intrinsics: IntrinsicMatrix,
}

impl Transformer {
    /// Create a new transformer.
    ///
    /// # Arguments
    ///
    /// * `camera_pose` - The pose of the camera as measured from the robot.
    /// * `camera_intrinsics` - The camera intrinsic matrix.
    pub fn new(camera_pose: Transform, camera_intrinsics: IntrinsicMatrix) -> Self {
        Self {
            camera_pose,
            camera_intrinsics,
        }
    }

    /// Create a new transformer from untyped matrix rows.
    ///
    /// # Errors
    ///
    /// [`TransformError::ShapeMismatch`] if the camera pose is not 4x4 or the intrinsic matrix is
    /// not 3x3, and [`TransformError::NotRigid`] if the camera pose is not a rigid transform.
    pub fn try_from_rows<P: AsRef<[f64]>, K: AsRef<[f64]>>(
        camera_pose: &[P],
        camera_intrinsics: &[K],
    ) -> Result<Self, TransformError> {
        Ok(Self::new(
            Transform::from_rows(camera_pose)?,
            IntrinsicMatrix::from_rows(camera_intrinsics)?,
        ))
    }

    /// A copy of this transformer with a different camera pose.
    pub fn with_camera_pose(&self, camera_pose: Transform) -> Self {
        Self::new(camera_pose, self.camera_intrinsics)
    }

    /// A copy of this transformer with a different intrinsic matrix.
    pub fn with_intrinsics(&self, camera_intrinsics: IntrinsicMatrix) -> Self {
        Self::new(self.camera_pose, camera_intrinsics)
    }

    /// The pose of the camera as measured from the robot.
    pub fn camera_pose(&self) -> &Transform {
        &self.camera_pose
    }

    /// The camera intrinsic matrix.
    pub fn camera_intrinsics(&self) -> &IntrinsicMatrix {
        &self.camera_intrinsics
    }

    /// The mounting height of the camera above the ground plane.
    ///
    /// # Errors
    ///
    /// [`TransformError::DegenerateCameraHeight`] if the height is zero.
    pub fn camera_height(&self) -> Result<f64, TransformError> {
        let height = self.camera_pose.translation().z;
        if height == 0.0 || !height.is_finite() {
            return Err(TransformError::DegenerateCameraHeight(height));
        }
        Ok(height)
    }

    /// Given a robot's pose in the world, the pose of the camera in the world.
    pub fn transform_camera_to_world(&self, robot_pose: &Transform) -> Transform {
        *robot_pose * self.camera_pose
    }

    /// Lift a pixel onto the ground plane and express it in the world frame.
    ///
    /// The depth of the pixel is the camera mounting height.
    ///
    /// # Arguments
    ///
    /// * `pixel` - The pixel coordinates in the image rendered at `robot_pose`.
    /// * `robot_pose` - The pose of the robot as measured from the world.
    pub fn pixel_to_world(
        &self,
        pixel: DVec2,
        robot_pose: &Transform,
    ) -> Result<DVec3, TransformError> {
        let height = self.camera_height()?;
        let point_image = self.camera_intrinsics.unproject(pixel.extend(1.0)) * height;
        let point_robot = (self.camera_pose * IMAGE_TO_CAMERA).transform_point(point_image);
        Ok(robot_pose.transform_point(point_robot))
    }

    /// Project a world point into the image of a camera carried by a robot at `robot_pose`.
    ///
    /// The point is normalized by the camera mounting height, which is its depth whenever it lies
    /// on the ground plane.
    pub fn world_to_pixel(
        &self,
        point_world: DVec3,
        robot_pose: &Transform,
    ) -> Result<DVec2, TransformError> {
        let height = self.camera_height()?;
        let world_to_image = (*robot_pose * self.camera_pose * IMAGE_TO_CAMERA).inverse();
        let point_image = world_to_image.transform_point(point_world) / height;
        let pixel = self
            .camera_intrinsics
            .project(DVec3::new(point_image.x, point_image.y, 1.0));
        Ok(pixel.truncate())
    }

    /// Given a robot's pose in the world, find the pose of the top left pixel of its image in the
    /// global aligned image.
    ///
    /// The global image is the one obtained when the robot is at the origin of the world. The
    /// corner is lifted to the ground plane, then projected into the camera of a virtual robot
    /// sitting at the origin.
    ///
    /// # Returns
    ///
    /// The corner pose, with `x` and `y` in pixels and `theta` the robot yaw in radians.
    ///
    /// PRECONDITION: the robot rotation is a pure yaw about Z.
    pub fn project_image_corner(&self, robot_pose: &Transform) -> Result<PlanarPose, TransformError> {
        let point_world = self.pixel_to_world(DVec2::ZERO, robot_pose)?;
        let pixel = self.world_to_pixel(point_world, &Transform::IDENTITY)?;
        Ok(PlanarPose::new(pixel.x, pixel.y, planar_yaw(robot_pose)))
    }
}

/// The yaw of a transform whose rotation is a pure rotation about Z.
pub fn planar_yaw(pose: &Transform) -> f64 {
    let rows = pose.rows();
    let yaw = rows[0][0].clamp(-1.0, 1.0).acos();
    if rows[1][0] < 0.0 {
        -yaw
    } else {
        yaw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::make_transform;
    use approx::assert_abs_diff_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn downward_transformer() -> Result<Transformer, TransformError> {
        let camera_pose = make_transform(0.0, 0.0, 1.0, 0.0, FRAC_PI_2, 0.0);
        let intrinsics = IntrinsicMatrix::new(100.0, 100.0, 0.0, 50.0, 50.0)?;
        Ok(Transformer::new(camera_pose, intrinsics))
    }

    #[test]
    fn test_image_to_camera_is_rotation() {
        assert_abs_diff_eq!(IMAGE_TO_CAMERA.rotation().determinant(), 1.0);
        assert_eq!(IMAGE_TO_CAMERA.translation(), DVec3::ZERO);
        assert_eq!(
            IMAGE_TO_CAMERA.rows(),
            [
                [0.0, 0.0, 1.0, 0.0],
                [-1.0, 0.0, 0.0, 0.0],
                [0.0, -1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]
        );
    }

    #[test]
    fn test_try_from_rows_shape_mismatch() {
        let pose = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
        let intrinsics = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
        assert!(matches!(
            Transformer::try_from_rows(&pose, &intrinsics),
            Err(TransformError::ShapeMismatch {
                expected: (4, 4),
                ..
            })
        ));

        let pose = Transform::IDENTITY.rows();
        let intrinsics = vec![vec![1.0, 0.0, 0.0, 0.0]; 4];
        assert!(matches!(
            Transformer::try_from_rows(&pose, &intrinsics),
            Err(TransformError::ShapeMismatch {
                expected: (3, 3),
                ..
            })
        ));
    }

    #[test]
    fn test_try_from_rows_scaled_pose() {
        let pose = [
            [2.0, 0.0, 0.0, 1.0],
            [0.0, 2.0, 0.0, 0.0],
            [0.0, 0.0, 2.0, 1.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let intrinsics = IntrinsicMatrix::IDENTITY.rows();
        assert!(matches!(
            Transformer::try_from_rows(&pose, &intrinsics),
            Err(TransformError::NotRigid(_))
        ));
    }

    #[test]
    fn test_with_replaced_values() -> Result<(), TransformError> {
        let transformer = downward_transformer()?;
        let other = transformer.with_camera_pose(Transform::IDENTITY);
        assert_eq!(other.camera_pose(), &Transform::IDENTITY);
        assert_eq!(other.camera_intrinsics(), transformer.camera_intrinsics());

        let other = transformer.with_intrinsics(IntrinsicMatrix::IDENTITY);
        assert_eq!(other.camera_intrinsics(), &IntrinsicMatrix::IDENTITY);
        assert_eq!(other.camera_pose(), transformer.camera_pose());
        Ok(())
    }

    #[test]
    fn test_camera_to_world_identity_laws() {
        let transformer = Transformer::new(Transform::IDENTITY, IntrinsicMatrix::IDENTITY);
        assert_eq!(
            transformer.transform_camera_to_world(&Transform::IDENTITY),
            Transform::IDENTITY
        );

        let pose = make_transform(1.0, 2.0, 3.0, 0.1, 0.2, 0.3);
        assert_eq!(transformer.transform_camera_to_world(&pose), pose);

        let transformer = transformer.with_camera_pose(pose);
        assert_eq!(
            transformer.transform_camera_to_world(&Transform::IDENTITY),
            pose
        );
    }

    #[test]
    fn test_camera_to_world_composition() -> Result<(), TransformError> {
        let transformer = downward_transformer()?;
        let robot_pose = make_transform(2.0, 3.0, 0.0, 0.0, 0.0, FRAC_PI_2);
        let camera_world = transformer.transform_camera_to_world(&robot_pose);
        let translation = camera_world.translation();
        assert_abs_diff_eq!(translation.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(translation.y, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(translation.z, 1.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_project_image_corner_identity() -> Result<(), TransformError> {
        let corner = downward_transformer()?.project_image_corner(&Transform::IDENTITY)?;
        assert_abs_diff_eq!(corner.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.y, 0.0, epsilon = 1e-9);
        assert_eq!(corner.theta, 0.0);
        Ok(())
    }

    #[test]
    fn test_project_image_corner_identity_random() -> Result<(), TransformError> {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let camera_pose = make_transform(
                rng.random_range(-0.5..0.5),
                rng.random_range(-0.5..0.5),
                rng.random_range(0.1..2.0),
                rng.random_range(-0.3..0.3),
                rng.random_range(1.2..1.9),
                rng.random_range(-PI..PI),
            );
            let intrinsics = IntrinsicMatrix::new(
                rng.random_range(100.0..1000.0),
                rng.random_range(100.0..1000.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(0.0..640.0),
                rng.random_range(0.0..480.0),
            )?;
            let corner =
                Transformer::new(camera_pose, intrinsics).project_image_corner(&Transform::IDENTITY)?;
            assert_abs_diff_eq!(corner.x, 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(corner.y, 0.0, epsilon = 1e-6);
            assert_eq!(corner.theta, 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_project_image_corner_translation() -> Result<(), TransformError> {
        // moving forward one meter shifts the corner one meter up the global image
        let robot_pose = make_transform(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let corner = downward_transformer()?.project_image_corner(&robot_pose)?;
        assert_abs_diff_eq!(corner.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.y, -100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.theta, 0.0);
        Ok(())
    }

    #[test]
    fn test_project_image_corner_rotation() -> Result<(), TransformError> {
        let transformer = downward_transformer()?;

        let robot_pose = make_transform(0.0, 0.0, 0.0, 0.0, 0.0, FRAC_PI_2);
        let corner = transformer.project_image_corner(&robot_pose)?;
        assert_abs_diff_eq!(corner.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.y, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(corner.theta, FRAC_PI_2, epsilon = 1e-12);

        let robot_pose = make_transform(0.0, 0.0, 0.0, 0.0, 0.0, -FRAC_PI_2);
        let corner = transformer.project_image_corner(&robot_pose)?;
        assert_abs_diff_eq!(corner.theta, -FRAC_PI_2, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_project_image_corner_zero_height() {
        let transformer = Transformer::new(Transform::IDENTITY, IntrinsicMatrix::IDENTITY);
        assert_eq!(
            transformer.project_image_corner(&Transform::IDENTITY),
            Err(TransformError::DegenerateCameraHeight(0.0))
        );
    }

    #[test]
    fn test_pixel_round_trip() -> Result<(), TransformError> {
        let mut rng = StdRng::seed_from_u64(3);
        let transformer = Transformer::new(
            make_transform(0.1, -0.2, 0.4, 0.05, 1.5, 0.3),
            IntrinsicMatrix::new(500.0, 520.0, 0.5, 320.0, 240.0)?,
        );
        for _ in 0..50 {
            let pixel = DVec2::new(rng.random_range(0.0..640.0), rng.random_range(0.0..480.0));
            let robot_pose = make_transform(
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
                0.0,
                0.0,
                0.0,
                rng.random_range(-PI..PI),
            );
            let point_world = transformer.pixel_to_world(pixel, &robot_pose)?;
            let pixel_back = transformer.world_to_pixel(point_world, &robot_pose)?;
            assert_abs_diff_eq!(pixel_back.x, pixel.x, epsilon = 1e-6);
            assert_abs_diff_eq!(pixel_back.y, pixel.y, epsilon = 1e-6);
        }
        Ok(())
    }

    #[test]
    fn test_planar_yaw_sign() {
        for yaw in [-3.0, -1.0, -0.1, 0.0, 0.1, 1.0, 3.0] {
            let pose = make_transform(0.0, 0.0, 0.0, 0.0, 0.0, yaw);
            assert_abs_diff_eq!(planar_yaw(&pose), yaw, epsilon = 1e-9);
        }
    }
}
