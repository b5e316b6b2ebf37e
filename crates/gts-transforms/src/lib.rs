#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Frames
//!
//! - **world**: the ground plane is `z = 0`.
//! - **robot**: moves on the ground plane, its rotation is a pure yaw.
//! - **camera**: mounted on the robot at a fixed [`transform::Transform`].
//! - **image**: the optical frame of the renderer, +X right, +Y down, +Z forward.
//! - **pixel**: image coordinates after the [`intrinsics::IntrinsicMatrix`].
//!
//! ## Example
//!
//! ```rust
//! use gts_transforms::{IntrinsicMatrix, PlanarPose, Pose6, Transformer};
//!
//! let camera_pose = Pose6::new(0.0, 0.0, 0.5, 0.0, std::f64::consts::FRAC_PI_2, 0.0);
//! let intrinsics = IntrinsicMatrix::new(800.0, 800.0, 0.0, 320.0, 240.0).unwrap();
//! let transformer = Transformer::new(camera_pose.to_transform(), intrinsics);
//!
//! let robot_pose = PlanarPose::new(1.0, 2.0, 0.3).to_transform();
//! let camera_world = transformer.transform_camera_to_world(&robot_pose);
//! let corner = transformer.project_image_corner(&robot_pose).unwrap();
//! ```

/// Error types for the transforms module.
pub mod error;

/// Pinhole camera intrinsic matrix.
pub mod intrinsics;

/// Pose parameterizations.
pub mod pose;

/// Homogeneous transforms built from 6-DOF poses.
pub mod transform;

/// Conversion between robot, camera, image and pixel frames.
pub mod transformer;

pub use error::TransformError;
pub use intrinsics::IntrinsicMatrix;
pub use pose::{PlanarPose, Pose6};
pub use transform::{make_transform, Transform};
pub use transformer::{planar_yaw, Transformer, IMAGE_TO_CAMERA};
