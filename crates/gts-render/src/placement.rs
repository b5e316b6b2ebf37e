use std::f64::consts::FRAC_PI_2;

use glam::{DMat3, DVec3};
use gts_transforms::Transform;

/// Rotation from *extrinsic* XYZ Euler angles, i.e. `Rz(yaw) * Ry(pitch) * Rx(roll)`.
pub fn euler_xyz_rotation(roll: f64, pitch: f64, yaw: f64) -> DMat3 {
    DMat3::from_rotation_z(yaw) * DMat3::from_rotation_y(pitch) * DMat3::from_rotation_x(roll)
}

/// Extract *extrinsic* XYZ Euler angles `(roll, pitch, yaw)` from a rotation matrix.
///
/// Pitch is in `[-pi/2, pi/2]`. At gimbal lock the roll is set to zero.
pub fn euler_xyz(rotation: &DMat3) -> DVec3 {
    // R[row][col] is the `row` component of column `col`
    let r00 = rotation.x_axis.x;
    let r10 = rotation.x_axis.y;
    let r20 = rotation.x_axis.z;
    let r01 = rotation.y_axis.x;
    let r11 = rotation.y_axis.y;
    let r21 = rotation.y_axis.z;
    let r22 = rotation.z_axis.z;

    let pitch = (-r20).clamp(-1.0, 1.0).asin();
    if (r21.abs() + r22.abs()) < 1e-12 {
        return DVec3::new(0.0, pitch, (-r01).atan2(r11));
    }
    DVec3::new(r21.atan2(r22), pitch, r10.atan2(r00))
}

/// Rotation from the robotics camera convention (X forward, Y left, Z up) to the renderer camera
/// convention (looking down -Z with +Y up).
pub fn renderer_adjustment() -> Transform {
    Transform::from_rotation_translation(euler_xyz_rotation(FRAC_PI_2, 0.0, -FRAC_PI_2), DVec3::ZERO)
}

/// The world pose the renderer's camera object must take to see what a camera at
/// `camera_world_pose` sees.
pub fn renderer_placement(camera_world_pose: &Transform) -> Transform {
    *camera_world_pose * renderer_adjustment()
}

/// A camera object placement in the renderer's scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPlacement {
    /// Location in the world, in meters.
    pub location: DVec3,
    /// Extrinsic XYZ Euler angles `(roll, pitch, yaw)`, in radians.
    pub rotation_euler: DVec3,
}

impl CameraPlacement {
    /// Placement of the renderer camera for a camera pose in the robotics convention.
    pub fn from_camera_pose(camera_world_pose: &Transform) -> Self {
        let placement = renderer_placement(camera_world_pose);
        Self {
            location: placement.translation(),
            rotation_euler: euler_xyz(&placement.rotation()),
        }
    }
}
