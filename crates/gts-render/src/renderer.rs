use std::path::Path;

use gts_transforms::{IntrinsicMatrix, Transform};

/// A rendering backend able to produce images of the textured ground.
///
/// Implementations own the scene. The pipeline asks for the intrinsic matrix of the configured
/// camera once, then renders one image per trajectory pose.
pub trait Renderer {
    /// Backend specific error.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The 3x3 intrinsic matrix of a camera in the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if no camera named `camera_name` exists in the scene.
    fn intrinsic_matrix(&self, camera_name: &str) -> Result<IntrinsicMatrix, Self::Error>;

    /// Place a camera in the world and write exactly one PNG image.
    ///
    /// # Arguments
    ///
    /// * `camera_name` - The camera to place.
    /// * `image_path` - The absolute path of the image to write. Its parent folder exists.
    /// * `camera_world_pose` - The pose of the camera in the world, in the robotics convention
    ///   (X forward, Y left, Z up). See [`crate::placement`] to convert it to the renderer's
    ///   convention.
    fn render(
        &mut self,
        camera_name: &str,
        image_path: &Path,
        camera_world_pose: &Transform,
    ) -> Result<(), Self::Error>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    type Error = R::Error;

    fn intrinsic_matrix(&self, camera_name: &str) -> Result<IntrinsicMatrix, Self::Error> {
        (**self).intrinsic_matrix(camera_name)
    }

    fn render(
        &mut self,
        camera_name: &str,
        image_path: &Path,
        camera_world_pose: &Transform,
    ) -> Result<(), Self::Error> {
        (**self).render(camera_name, image_path, camera_world_pose)
    }
}
