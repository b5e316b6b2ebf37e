use serde::{Deserialize, Serialize};

use crate::transform::{make_transform, Transform};

/// A 6-DOF pose: translation in meters and intrinsic roll-pitch-yaw angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose6 {
    /// X translation in meters.
    pub x: f64,
    /// Y translation in meters.
    pub y: f64,
    /// Z translation in meters.
    pub z: f64,
    /// Rotation about X in radians.
    pub roll: f64,
    /// Rotation about Y in radians.
    pub pitch: f64,
    /// Rotation about Z in radians.
    pub yaw: f64,
}

impl Pose6 {
    /// Create a new pose from its six components.
    pub fn new(x: f64, y: f64, z: f64, roll: f64, pitch: f64, yaw: f64) -> Self {
        Self {
            x,
            y,
            z,
            roll,
            pitch,
            yaw,
        }
    }

    /// The homogeneous transform of this pose.
    pub fn to_transform(&self) -> Transform {
        make_transform(self.x, self.y, self.z, self.roll, self.pitch, self.yaw)
    }
}

/// A pose on the ground plane.
///
/// For trajectories the units are meters and `theta` is the yaw about Z. The same triple is used
/// for image-corner poses, where `x` and `y` are pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanarPose {
    /// X position.
    pub x: f64,
    /// Y position.
    pub y: f64,
    /// Yaw in radians.
    pub theta: f64,
}

impl PlanarPose {
    /// Create a new planar pose.
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// The homogeneous transform of this pose, with z, roll and pitch set to zero.
    pub fn to_transform(&self) -> Transform {
        make_transform(self.x, self.y, 0.0, 0.0, 0.0, self.theta)
    }

    /// The pose as an `[x, y, theta]` array.
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.theta]
    }
}

impl From<[f64; 3]> for PlanarPose {
    fn from(value: [f64; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}
