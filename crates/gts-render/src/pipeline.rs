use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use gts_io::{
    config::{load_configuration, ConfigError, Configuration},
    naming::NameConfigurator,
    trajectory::{read_trajectory, TrajectoryError},
    writer::{write_camera_pose, write_intrinsic_matrix, write_list_files, ListFiles, WriterError},
};
use gts_transforms::{planar_yaw, PlanarPose, Transform, TransformError, Transformer};

use crate::renderer::Renderer;

/// Error types for the dataset pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Invalid or unreadable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid or unreadable trajectory.
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),

    /// Invalid camera geometry.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Failure writing the ground truth files.
    #[error(transparent)]
    Writer(#[from] WriterError),

    /// Failure creating the output folders.
    #[error("Failed to prepare the output folder. {0}")]
    Io(#[from] std::io::Error),

    /// The renderer has no camera with the configured name.
    #[error("{name} is not a camera known to the renderer")]
    CameraNotFound {
        /// The configured camera name.
        name: String,
        /// The renderer's own error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The renderer failed to produce an image.
    #[error("Failed to render {}", .path.display())]
    RenderFailed {
        /// The image that was being rendered.
        path: PathBuf,
        /// The renderer's own error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Images may only be rendered to absolute paths.
    #[error("Image path must be absolute. Received: {}", .0.display())]
    RelativeImagePath(PathBuf),
}

/// Load the configuration, then the trajectory it points to.
pub fn load_inputs(
    config_path: impl AsRef<Path>,
) -> Result<(Configuration, Vec<PlanarPose>), PipelineError> {
    let config = load_configuration(config_path)?;
    let trajectory = read_trajectory(&config.trajectory)?;
    Ok((config, trajectory))
}

/// Render a single image, rejecting relative paths before the renderer is called.
pub fn render_image<R: Renderer>(
    renderer: &mut R,
    camera_name: &str,
    image_path: &Path,
    camera_world_pose: &Transform,
) -> Result<(), PipelineError> {
    if !image_path.is_absolute() {
        return Err(PipelineError::RelativeImagePath(image_path.to_path_buf()));
    }

    renderer
        .render(camera_name, image_path, camera_world_pose)
        .map_err(|e| PipelineError::RenderFailed {
            path: image_path.to_path_buf(),
            source: Box::new(e),
        })
}

/// The files produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Number of images rendered.
    pub image_count: usize,
    /// The camera intrinsic matrix file.
    pub intrinsic_matrix_file: PathBuf,
    /// The camera pose file.
    pub camera_pose_file: PathBuf,
    /// The three list files.
    pub list_files: ListFiles,
}

/// Renders a trajectory and writes its ground truth.
///
/// Execution is sequential and any failure aborts the run.
pub struct DatasetGenerator<R: Renderer> {
    camera_name: String,
    trajectory: Vec<PlanarPose>,
    renderer: R,
    transformer: Transformer,
    namer: NameConfigurator,
}

impl<R: Renderer> DatasetGenerator<R> {
    /// Create a new dataset generator.
    ///
    /// # Arguments
    ///
    /// * `config` - The validated run configuration.
    /// * `trajectory` - The robot poses to render.
    /// * `renderer` - The rendering backend.
    /// * `date` - The date used to name the output.
    ///
    /// # Errors
    ///
    /// [`PipelineError::CameraNotFound`] if the renderer does not know the configured camera.
    ///
    /// A camera mounted at zero height is accepted. Its images are rendered but their corner
    /// poses in pixels are not finite.
    pub fn new(
        config: Configuration,
        trajectory: Vec<PlanarPose>,
        renderer: R,
        date: NaiveDate,
    ) -> Result<Self, PipelineError> {
        let camera_name = config.camera.name.clone();
        let intrinsics = renderer.intrinsic_matrix(&camera_name).map_err(|e| {
            PipelineError::CameraNotFound {
                name: camera_name.clone(),
                source: Box::new(e),
            }
        })?;

        let transformer = Transformer::new(config.camera.transform(), intrinsics);
        if let Err(e) = transformer.camera_height() {
            log::warn!("{e}. Image corner poses will not be finite");
        }

        let output = if config.output.is_absolute() {
            config.output
        } else {
            std::env::current_dir()?.join(config.output)
        };

        Ok(Self {
            camera_name,
            trajectory,
            renderer,
            transformer,
            namer: NameConfigurator::new(output, config.sequence, date),
        })
    }

    /// The transformer built from the camera pose and intrinsics.
    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    /// The names used for the output.
    pub fn namer(&self) -> &NameConfigurator {
        &self.namer
    }

    /// The rendering backend.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consume the generator, returning the rendering backend.
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Render every pose of the trajectory and write the ground truth files.
    pub fn run(&mut self) -> Result<DatasetSummary, PipelineError> {
        let output = self.namer.output_folder().to_path_buf();
        log::info!(
            "Generating {} images of {} in {}",
            self.trajectory.len(),
            self.namer.base_name(),
            output.display()
        );

        let intrinsic_matrix_file = write_intrinsic_matrix(
            self.transformer.camera_intrinsics(),
            &self.camera_name,
            &output,
        )?;
        let camera_pose_file =
            write_camera_pose(self.transformer.camera_pose(), &self.camera_name, &output)?;

        let image_directory = output.join(self.namer.image_directory());
        if !image_directory.exists() {
            std::fs::create_dir_all(&image_directory)?;
        }

        let mut poses_pixel = Vec::with_capacity(self.trajectory.len());
        let mut image_paths = Vec::with_capacity(self.trajectory.len());
        for (index, pose) in self.trajectory.iter().enumerate() {
            let robot_pose = pose.to_transform();
            let camera_world_pose = self.transformer.transform_camera_to_world(&robot_pose);

            let image_path = self.namer.image_path(index);
            render_image(
                &mut self.renderer,
                &self.camera_name,
                &image_path,
                &camera_world_pose,
            )?;

            let corner = match self.transformer.project_image_corner(&robot_pose) {
                Ok(corner) => corner,
                Err(TransformError::DegenerateCameraHeight(_)) => {
                    PlanarPose::new(f64::NAN, f64::NAN, planar_yaw(&robot_pose))
                }
                Err(e) => return Err(e.into()),
            };
            log::debug!(
                "[{index}] robot ({:.3}, {:.3}, {:.3}) -> corner ({:.3}, {:.3}) {}",
                pose.x,
                pose.y,
                pose.theta,
                corner.x,
                corner.y,
                image_path.display()
            );

            poses_pixel.push(corner);
            image_paths.push(self.namer.relative_image_path(index));
        }

        let list_files =
            write_list_files(&self.namer, &self.trajectory, &poses_pixel, &image_paths)?;
        log::info!("Wrote {} images", image_paths.len());

        Ok(DatasetSummary {
            image_count: image_paths.len(),
            intrinsic_matrix_file,
            camera_pose_file,
            list_files,
        })
    }
}
